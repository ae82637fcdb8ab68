//! Environment interaction and replay memory filling.
use crate::{Env, ExperienceBufferBase, Policy, TransitionProducer};
use anyhow::Result;

/// Steps the environment with a policy and pushes transitions into a
/// replay buffer.
///
/// The sampler owns the training environment and the transition producer
/// and keeps the previous observation between steps. The environment is
/// reset lazily: on the first call and on the first call after an episode
/// ended.
pub struct Sampler<E, P>
where
    E: Env,
    P: TransitionProducer<E>,
{
    env: E,
    prev_obs: Option<E::Obs>,
    producer: P,
}

impl<E, P> Sampler<E, P>
where
    E: Env,
    P: TransitionProducer<E>,
{
    /// Creates a sampler for the given environment and transition producer.
    pub fn new(env: E, producer: P) -> Self {
        Self {
            env,
            prev_obs: None,
            producer,
        }
    }

    /// Performs one environment step and pushes the resulting transition.
    ///
    /// Returns the reward of the step and whether the episode ended with
    /// it. `is_train` is forwarded to the environment.
    pub fn sample_and_push<A, R>(
        &mut self,
        policy: &mut A,
        buffer: &mut R,
        is_train: bool,
    ) -> Result<(f32, bool)>
    where
        A: Policy<E>,
        R: ExperienceBufferBase<Item = P::Output>,
    {
        // Reset environment and producer at episode boundaries
        if self.prev_obs.is_none() {
            let init_obs = self.env.reset()?;
            self.producer.reset(init_obs.clone());
            self.prev_obs = Some(init_obs);
        }

        let act = policy.sample(self.prev_obs.as_ref().unwrap())?;
        let step = self.env.step(&act, is_train);
        let reward = step.reward;
        let is_over = step.is_over;

        self.prev_obs = match is_over {
            true => None,
            false => Some(step.obs.clone()),
        };

        let transition = self.producer.process(step);
        buffer.push(transition)?;

        Ok((reward, is_over))
    }
}
