//! Replay buffer interfaces.
use anyhow::Result;

/// Interface for buffers that store experiences from environments.
pub trait ExperienceBufferBase {
    /// The type of items stored in the buffer.
    type Item;

    /// Pushes a new experience into the buffer.
    fn push(&mut self, tr: Self::Item) -> Result<()>;

    /// Returns the current number of experiences in the buffer.
    fn len(&self) -> usize;

    /// Returns `true` if the buffer stores no experience.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Interface for replay buffers that generate batches for training.
///
/// This trait is independent of [`ExperienceBufferBase`] and focuses solely
/// on the batch generation process.
pub trait ReplayBufferBase {
    /// Configuration parameters of the buffer.
    type Config: Clone;

    /// The type of batches generated for training.
    type Batch;

    /// Builds a replay buffer from the given configuration.
    fn build(config: &Self::Config) -> Self;

    /// Constructs a batch of experiences for training.
    ///
    /// Fails when `size` transitions cannot be drawn from the current
    /// contents.
    fn batch(&mut self, size: usize) -> Result<Self::Batch>;
}
