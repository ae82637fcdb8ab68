//! A bounded replay memory with uniform random batch sampling.
//!
//! Transitions are stored column-wise: observations, actions, rewards,
//! next observations and episode-over flags each live in their own buffer.
//! Sampling gathers the same set of indices from every column, so the
//! consumer receives five parallel sequences without re-assembling
//! per-transition records.
mod base;
mod batch;
mod config;
mod step_proc;
pub use base::ReplayMemory;
pub use batch::{BatchData, Transitions};
pub use config::ReplayMemoryConfig;
pub use step_proc::{SimpleTransitionProducer, SimpleTransitionProducerConfig};
