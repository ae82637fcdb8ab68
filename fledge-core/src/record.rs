//! Types for recording training metrics.
//!
//! A [`Record`] is a set of named values produced during training or
//! evaluation, like an episode return or a loss. A [`Recorder`] receives
//! records from the [`Trainer`](crate::Trainer)
//! and decides what to do with them; [`NullRecorder`] discards everything
//! and [`BufferedRecorder`] keeps records in memory, which is convenient in
//! tests.
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
