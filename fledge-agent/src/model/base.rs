//! Definition of the interface of learnable action-value models.
use anyhow::Result;
use fledge_core::TransitionBatch;
use std::path::Path;

/// A learnable action-value function.
///
/// This is the seam to the external learner: the agent forwards batches of
/// observations for prediction and batches of transitions for learning,
/// and otherwise treats the model as a black box. Implementations keep
/// both the online network and its slower-moving target network behind
/// this interface.
///
/// Any failure returned from these methods is propagated unchanged by the
/// agent and terminates the current training attempt; no retry is
/// performed.
pub trait ValueModel {
    /// Batched observations consumed by the model.
    type ObsBatch;

    /// Batched actions consumed by the model.
    type ActBatch;

    /// Computes action values for a batch of observations.
    ///
    /// Returns one action-value vector per observation, in batch order.
    fn predict(&mut self, obs: &Self::ObsBatch) -> Result<Vec<Vec<f32>>>;

    /// Performs one learning step on a batch of transitions and returns
    /// the scalar loss.
    fn learn<B>(&mut self, batch: B) -> Result<f32>
    where
        B: TransitionBatch<ObsBatch = Self::ObsBatch, ActBatch = Self::ActBatch>;

    /// Copies the online parameters into the target network.
    fn sync_target(&mut self) -> Result<()>;

    /// Saves the model parameters to the given path.
    ///
    /// The checkpoint is a single opaque blob; its format is up to the
    /// implementation.
    fn save(&self, path: &Path) -> Result<()>;

    /// Loads the model parameters from the given path.
    ///
    /// Checking that the checkpoint exists is the caller's concern.
    fn load(&mut self, path: &Path) -> Result<()>;
}
