//! Core functionalities.
mod agent;
mod batch;
mod env;
mod policy;
mod replay_buffer;
mod step;
pub use agent::Agent;
pub use batch::TransitionBatch;
pub use env::Env;
pub use policy::Policy;
pub use replay_buffer::{ExperienceBufferBase, ReplayBufferBase};
use std::fmt::Debug;
pub use step::{Info, Step, TransitionProducer};

/// An observation of an environment.
///
/// The payload is opaque to this crate. Downstream code converts
/// observations into whatever batched representation its value model
/// consumes; here an observation only needs to be cloneable so that it can
/// be kept across an environment step while also being stored in a
/// transition.
pub trait Obs: Clone + Debug {}

/// An action on an environment.
pub trait Act: Clone + Debug {}
