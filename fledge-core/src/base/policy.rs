//! Policy.
use super::Env;
use anyhow::Result;

/// A policy on an environment.
///
/// Policy is a mapping from an observation to an action.
/// The mapping can be either deterministic or stochastic.
///
/// Sampling an action is fallible: a policy backed by an external value
/// model propagates prediction failures to the caller, which treats them
/// as fatal for the current training attempt.
pub trait Policy<E: Env> {
    /// Samples an action given an observation.
    fn sample(&mut self, obs: &E::Obs) -> Result<E::Act>;
}
