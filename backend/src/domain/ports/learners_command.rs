//! Driving port for learner mutations.
//!
//! Commands take raw client input; implementations validate it and return
//! `invalid_request` errors carrying field details.

use async_trait::async_trait;

use crate::domain::{Error, Learner, LearnerChanges, NewLearner, RecordId};

/// Write-side use cases for the learner collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LearnersCommand: Send + Sync {
    /// Enrol a learner with a freshly allocated id and zero progress.
    async fn create_learner(&self, learner: NewLearner) -> Result<Learner, Error>;

    /// Shallow-merge `changes` onto an existing learner.
    ///
    /// # Errors
    ///
    /// - `not_found` when no learner has this id.
    /// - `invalid_request` when `changes` carries no usable field.
    async fn update_learner(
        &self,
        id: RecordId,
        changes: LearnerChanges,
    ) -> Result<Learner, Error>;

    /// Remove a learner, returning the removed record.
    async fn delete_learner(&self, id: RecordId) -> Result<Learner, Error>;
}
