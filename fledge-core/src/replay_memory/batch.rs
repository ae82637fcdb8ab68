//! Columnar storage of transitions.
use crate::TransitionBatch;

/// A column of batched data.
///
/// Implementors store up to `capacity` fixed-shape items and hand out
/// copies of selected items on [`sample`](BatchData::sample). The payload
/// itself is opaque to the replay memory; only same-size, same-dtype
/// storage semantics are assumed.
pub trait BatchData {
    /// Creates an empty column with the given capacity.
    fn new(capacity: usize) -> Self;

    /// Writes `data` starting at index `ix`, wrapping around at the
    /// column's capacity.
    fn push(&mut self, ix: usize, data: Self);

    /// Gathers the items at the given indices into a new column.
    fn sample(&self, ixs: &[usize]) -> Self;
}

/// Transitions in columnar form.
///
/// The same type serves as the item pushed into [`ReplayMemory`] (then
/// holding a single transition) and as the batch it samples. Column `i`
/// across all five columns refers to the same transition.
///
/// [`ReplayMemory`]: super::ReplayMemory
#[derive(Debug)]
pub struct Transitions<O, A>
where
    O: BatchData,
    A: BatchData,
{
    /// Observations.
    pub obs: O,

    /// Actions.
    pub act: A,

    /// Next observations.
    pub next_obs: O,

    /// Rewards.
    pub reward: Vec<f32>,

    /// Episode-over flags.
    pub is_over: Vec<bool>,
}

impl<O, A> TransitionBatch for Transitions<O, A>
where
    O: BatchData,
    A: BatchData,
{
    type ObsBatch = O;
    type ActBatch = A;

    fn unpack(self) -> (O, A, O, Vec<f32>, Vec<bool>) {
        (
            self.obs,
            self.act,
            self.next_obs,
            self.reward,
            self.is_over,
        )
    }

    fn len(&self) -> usize {
        self.reward.len()
    }

    fn obs(&self) -> &O {
        &self.obs
    }

    fn act(&self) -> &A {
        &self.act
    }
}
