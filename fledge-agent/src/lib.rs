#![warn(missing_docs)]
//! DQN agent for the fledge reinforcement learning library.
//!
//! The agent is generic over the value model: anything implementing
//! [`ValueModel`](model::ValueModel) can be plugged in, from a
//! convolutional Q-network to a table. This crate never touches a tensor
//! backend itself; it only decides which action to take, when to learn,
//! and when to synchronize the target network.
mod batch;
pub mod dqn;
pub mod model;

pub use batch::{DiscreteActBatch, FloatBatch};
