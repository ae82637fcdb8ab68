//! Default implementation of the [`Evaluator`] trait.
use super::Evaluator;
use crate::{Env, Policy};
use anyhow::Result;

/// Runs a fixed number of episodes and averages the episode returns.
///
/// The evaluator owns a dedicated environment instance so that evaluation
/// never disturbs the state of the training environment. Steps are taken
/// with `is_train == false`.
pub struct DefaultEvaluator<E: Env> {
    n_episodes: usize,
    env: E,
}

impl<E: Env, P: Policy<E>> Evaluator<E, P> for DefaultEvaluator<E> {
    fn evaluate(&mut self, policy: &mut P) -> Result<f32> {
        let mut r_total = 0f32;

        for _ in 0..self.n_episodes {
            let mut prev_obs = self.env.reset()?;

            loop {
                let act = policy.sample(&prev_obs)?;
                let step = self.env.step(&act, false);
                r_total += step.reward;
                if step.is_over {
                    break;
                }
                prev_obs = step.obs;
            }
        }

        Ok(r_total / self.n_episodes as f32)
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs [`DefaultEvaluator`].
    ///
    /// `n_episodes` is the number of episodes run per evaluation.
    pub fn new(config: &E::Config, seed: i64, n_episodes: usize) -> Result<Self> {
        Ok(Self {
            n_episodes,
            env: E::build(config, seed)?,
        })
    }
}
