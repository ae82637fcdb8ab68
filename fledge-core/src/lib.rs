#![warn(missing_docs)]
//! Core abstractions for training agents that learn from replayed experience.
//!
//! This crate provides the framework-agnostic pieces of the library:
//! environment and policy interfaces, a bounded replay memory with uniform
//! random batch sampling, a training loop, an evaluator, and a record system
//! for training metrics. Value-function models live behind trait seams in
//! downstream crates; nothing in here depends on a tensor backend.
pub mod error;
pub mod record;
pub mod replay_memory;

mod base;
pub use base::{
    Act, Agent, Env, ExperienceBufferBase, Info, Obs, Policy, ReplayBufferBase, Step,
    TransitionBatch, TransitionProducer,
};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};

mod trainer;
pub use trainer::{Sampler, Trainer, TrainerConfig};
