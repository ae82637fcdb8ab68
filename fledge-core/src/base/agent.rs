//! Agent.
use super::{Env, Policy, ReplayBufferBase};
use crate::record::Record;
use anyhow::Result;
use std::path::Path;

/// Represents a trainable policy on an environment.
pub trait Agent<E: Env, R: ReplayBufferBase>: Policy<E> {
    /// Sets the policy to training mode.
    fn train(&mut self);

    /// Sets the policy to evaluation mode.
    fn eval(&mut self);

    /// Returns if it is in training mode.
    fn is_train(&self) -> bool;

    /// Performs an optimization step.
    ///
    /// `buffer` is a replay buffer from which a batch of transitions will
    /// be taken for updating model parameters. A failure of the underlying
    /// model propagates unchanged; callers treat it as fatal for the
    /// current training attempt.
    fn opt(&mut self, buffer: &mut R) -> Result<Record>;

    /// Saves the parameters of the agent in the given directory.
    fn save_params(&self, path: &Path) -> Result<()>;

    /// Loads the parameters of the agent from the given directory.
    fn load_params(&mut self, path: &Path) -> Result<()>;
}
