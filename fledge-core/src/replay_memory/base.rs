//! The replay memory.
use super::{BatchData, ReplayMemoryConfig, Transitions};
use crate::{
    error::FledgeError, ExperienceBufferBase, ReplayBufferBase, TransitionBatch,
};
use anyhow::Result;
use rand::{rngs::StdRng, seq::index, SeedableRng};

/// A bounded replay memory of transitions.
///
/// The memory is a ring buffer with a moving write cursor: once `capacity`
/// transitions are stored, each push overwrites the oldest entry. Pushing
/// runs in O(1) amortized time and O(1) additional space per transition.
///
/// [`batch`](ReplayBufferBase::batch) draws transitions uniformly at
/// random with pairwise-distinct indices and returns them decomposed into
/// five parallel columns. No ordering is promised on the sampled output
/// beyond cross-column consistency.
pub struct ReplayMemory<O, A>
where
    O: BatchData,
    A: BatchData,
{
    capacity: usize,
    i: usize,
    size: usize,
    obs: O,
    act: A,
    next_obs: O,
    reward: Vec<f32>,
    is_over: Vec<bool>,
    rng: StdRng,
}

impl<O, A> ReplayMemory<O, A>
where
    O: BatchData,
    A: BatchData,
{
    #[inline]
    fn push_reward(&mut self, i: usize, b: &[f32]) {
        let mut j = i;
        for r in b.iter() {
            self.reward[j] = *r;
            j += 1;
            if j == self.capacity {
                j = 0;
            }
        }
    }

    #[inline]
    fn push_is_over(&mut self, i: usize, b: &[bool]) {
        let mut j = i;
        for d in b.iter() {
            self.is_over[j] = *d;
            j += 1;
            if j == self.capacity {
                j = 0;
            }
        }
    }

    fn sample_reward(&self, ixs: &[usize]) -> Vec<f32> {
        ixs.iter().map(|ix| self.reward[*ix]).collect()
    }

    fn sample_is_over(&self, ixs: &[usize]) -> Vec<bool> {
        ixs.iter().map(|ix| self.is_over[*ix]).collect()
    }
}

impl<O, A> ExperienceBufferBase for ReplayMemory<O, A>
where
    O: BatchData,
    A: BatchData,
{
    type Item = Transitions<O, A>;

    fn len(&self) -> usize {
        self.size
    }

    fn push(&mut self, tr: Self::Item) -> Result<()> {
        let len = tr.len();
        let (obs, act, next_obs, reward, is_over) = tr.unpack();
        self.obs.push(self.i, obs);
        self.act.push(self.i, act);
        self.next_obs.push(self.i, next_obs);
        self.push_reward(self.i, &reward);
        self.push_is_over(self.i, &is_over);

        self.i = (self.i + len) % self.capacity;
        self.size += len;
        if self.size >= self.capacity {
            self.size = self.capacity;
        }

        Ok(())
    }
}

impl<O, A> ReplayBufferBase for ReplayMemory<O, A>
where
    O: BatchData,
    A: BatchData,
{
    type Config = ReplayMemoryConfig;
    type Batch = Transitions<O, A>;

    fn build(config: &Self::Config) -> Self {
        let capacity = config.capacity;

        Self {
            capacity,
            i: 0,
            size: 0,
            obs: O::new(capacity),
            act: A::new(capacity),
            next_obs: O::new(capacity),
            reward: vec![0.; capacity],
            is_over: vec![false; capacity],
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Samples a batch of transitions from the memory.
    ///
    /// The `size` indices are pairwise distinct within a single draw.
    /// Fails with [`FledgeError::InvalidArgument`] when `size` exceeds the
    /// number of stored transitions.
    fn batch(&mut self, size: usize) -> Result<Self::Batch> {
        if size > self.size {
            return Err(FledgeError::InvalidArgument(format!(
                "batch size {} exceeds stored transitions {}",
                size, self.size
            ))
            .into());
        }

        let ixs = index::sample(&mut self.rng, self.size, size).into_vec();

        Ok(Self::Batch {
            obs: self.obs.sample(&ixs),
            act: self.act.sample(&ixs),
            next_obs: self.next_obs.sample(&ixs),
            reward: self.sample_reward(&ixs),
            is_over: self.sample_is_over(&ixs),
        })
    }
}
