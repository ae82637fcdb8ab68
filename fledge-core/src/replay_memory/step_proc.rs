//! Turns environment steps into single-transition batches.
use super::{BatchData, Transitions};
use crate::{Env, Step, TransitionProducer};
use std::{default::Default, marker::PhantomData};

/// Configuration of [`SimpleTransitionProducer`].
#[derive(Clone, Debug)]
pub struct SimpleTransitionProducerConfig {}

impl Default for SimpleTransitionProducerConfig {
    fn default() -> Self {
        Self {}
    }
}

/// Produces 1-step transitions `(o_t, a_t, o_t+1, r_t, is_over_t)`.
///
/// The previous observation `o_t` is kept here between steps; everything
/// else comes from the [`Step`] object. The producer must be reset with
/// the initial observation at every episode start.
pub struct SimpleTransitionProducer<E, O, A> {
    prev_obs: Option<O>,
    phantom: PhantomData<(E, A)>,
}

impl<E, O, A> TransitionProducer<E> for SimpleTransitionProducer<E, O, A>
where
    E: Env,
    O: BatchData + From<E::Obs>,
    A: BatchData + From<E::Act>,
{
    type Config = SimpleTransitionProducerConfig;
    type Output = Transitions<O, A>;

    fn build(_config: &Self::Config) -> Self {
        Self {
            prev_obs: None,
            phantom: PhantomData,
        }
    }

    fn reset(&mut self, init_obs: E::Obs) {
        self.prev_obs = Some(init_obs.into());
    }

    /// Processes a [`Step`] object into a single-transition batch.
    ///
    /// # Panics
    ///
    /// Panics if [`reset`](TransitionProducer::reset) has not been called
    /// before the first step of an episode.
    fn process(&mut self, step: Step<E>) -> Self::Output {
        let next_obs: O = step.obs.clone().into();
        let obs = match self.prev_obs.replace(step.obs.into()) {
            Some(obs) => obs,
            None => panic!("prev_obs is not set. Forgot to call reset()?"),
        };
        let act = step.act.into();

        Transitions {
            obs,
            act,
            next_obs,
            reward: vec![step.reward],
            is_over: vec![step.is_over],
        }
    }
}
