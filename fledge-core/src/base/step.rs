//! Environment step.
use super::Env;

/// Additional information to `Obs` and `Act`.
pub trait Info {}

impl Info for () {}

/// Represents an action, observation and reward tuple `(a_t, o_t+1, r_t)`
/// with some additional information.
///
/// An environment emits a [`Step`] object at every interaction step. This
/// object is used to create transitions `(o_t, a_t, o_t+1, r_t)`.
pub struct Step<E: Env> {
    /// Action.
    pub act: E::Act,

    /// Observation.
    pub obs: E::Obs,

    /// Reward.
    pub reward: f32,

    /// Flag denoting if the episode is over after this step.
    pub is_over: bool,

    /// Information defined by user.
    pub info: E::Info,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`] object.
    pub fn new(obs: E::Obs, act: E::Act, reward: f32, is_over: bool, info: E::Info) -> Self {
        Step {
            act,
            obs,
            reward,
            is_over,
            info,
        }
    }
}

/// Processes a [`Step`] and outputs an item [`Self::Output`].
///
/// This trait is used in [`Trainer`](crate::Trainer). A [`Step`] object is
/// transformed into [`Self::Output`], which will be pushed into a replay
/// buffer implementing [`ExperienceBufferBase`](crate::ExperienceBufferBase).
/// The type [`Self::Output`] should be the same as
/// [`ExperienceBufferBase::Item`](crate::ExperienceBufferBase::Item).
///
/// [`Self::Output`]: TransitionProducer::Output
pub trait TransitionProducer<E: Env> {
    /// Configuration.
    type Config: Clone;

    /// The type of transitions produced by this trait.
    type Output;

    /// Builds a producer.
    fn build(config: &Self::Config) -> Self;

    /// Resets the object with the initial observation of an episode.
    fn reset(&mut self, init_obs: E::Obs);

    /// Processes a [`Step`] object.
    fn process(&mut self, step: Step<E>) -> Self::Output;
}
