//! Evaluate a policy.
use crate::{Env, Policy};
use anyhow::Result;
mod default_evaluator;
pub use default_evaluator::DefaultEvaluator;

/// Evaluates a policy.
pub trait Evaluator<E: Env, P: Policy<E>> {
    /// Runs evaluation episodes and returns the mean episode return.
    ///
    /// The caller of this method needs to handle the internal state of
    /// `policy`, like switching between training and evaluation mode.
    fn evaluate(&mut self, policy: &mut P) -> Result<f32>;
}
