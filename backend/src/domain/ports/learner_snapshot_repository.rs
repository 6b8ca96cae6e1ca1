//! Driven port for mirroring the learner collection to durable storage.
//!
//! Adapters store the whole collection as one snapshot. `load` reports an
//! absent snapshot as `Ok(None)` so callers can tell "nothing saved yet"
//! apart from a snapshot that exists but cannot be read.

use async_trait::async_trait;

use crate::domain::Learner;

use super::define_port_error;

define_port_error! {
    /// Errors raised by learner snapshot adapters.
    pub enum LearnerSnapshotError {
        /// The snapshot could not be read from storage.
        Read { message: String } => "learner snapshot read failed: {message}",
        /// The snapshot exists but does not contain a learner list.
        Decode { message: String } => "learner snapshot is malformed: {message}",
        /// The snapshot could not be written.
        Write { message: String } => "learner snapshot write failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LearnerSnapshotRepository: Send + Sync {
    /// Read the stored learner list, if one has been saved.
    async fn load(&self) -> Result<Option<Vec<Learner>>, LearnerSnapshotError>;

    /// Replace the stored snapshot with `learners`.
    async fn save(&self, learners: &[Learner]) -> Result<(), LearnerSnapshotError>;
}

/// Snapshot port for memory-only operation: nothing is loaded or stored.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpLearnerSnapshots;

#[async_trait]
impl LearnerSnapshotRepository for NoOpLearnerSnapshots {
    async fn load(&self) -> Result<Option<Vec<Learner>>, LearnerSnapshotError> {
        Ok(None)
    }

    async fn save(&self, _learners: &[Learner]) -> Result<(), LearnerSnapshotError> {
        Ok(())
    }
}
