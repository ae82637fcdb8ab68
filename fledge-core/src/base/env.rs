//! Environment.
use super::{Act, Info, Obs, Step};
use anyhow::Result;

/// Represents an environment, typically a game emitting pixel observations.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Performs an environment step.
    ///
    /// `is_train` tells the environment whether the step belongs to a
    /// training episode; some environments render or pace themselves
    /// differently during evaluation.
    fn step(&mut self, act: &Self::Act, is_train: bool) -> Step<Self>
    where
        Self: Sized;

    /// The number of discrete actions of this environment.
    ///
    /// This is fixed over the lifetime of the environment.
    fn n_actions(&self) -> usize;
}
