//! Driving port for reading users.

use async_trait::async_trait;

use crate::domain::{Error, RecordId, User};

/// Read-side use cases for the user collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every user in insertion order.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// A single user, or `not_found`.
    async fn get_user(&self, id: RecordId) -> Result<User, Error>;
}
