//! Driving port for reading learners.

use async_trait::async_trait;

use crate::domain::{Error, Learner, RecordId};

/// Read-side use cases for the learner collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LearnersQuery: Send + Sync {
    /// Every learner in insertion order.
    async fn list_learners(&self) -> Result<Vec<Learner>, Error>;

    /// A single learner.
    ///
    /// # Errors
    ///
    /// Returns a `not_found` error when no learner has this id.
    async fn get_learner(&self, id: RecordId) -> Result<Learner, Error>;
}
