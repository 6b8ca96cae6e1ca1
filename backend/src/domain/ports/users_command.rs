//! Driving port for user mutations, including the bulk operations.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Error, NewUser, RecordId, User};

/// Unvalidated user update fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Result of a successful bulk delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteOutcome {
    /// Removed identifiers, duplicates collapsed, in request order.
    pub deleted_ids: Vec<RecordId>,
}

impl BulkDeleteOutcome {
    /// Number of removed users.
    #[must_use]
    pub fn deleted_count(&self) -> usize {
        self.deleted_ids.len()
    }
}

/// Write-side use cases for the user collection.
///
/// Bulk operations are all-or-nothing: a single invalid entry or unknown id
/// rejects the whole request and leaves the collection untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create one user.
    async fn create_user(&self, user: NewUser) -> Result<User, Error>;

    /// Create a batch of users with consecutive ids.
    ///
    /// # Errors
    ///
    /// `invalid_request` when the batch is empty or any entry lacks a name or
    /// email; details list the offending `invalidIndices`.
    async fn create_users(&self, users: Vec<NewUser>) -> Result<Vec<User>, Error>;

    /// Shallow-merge `changes` onto an existing user.
    async fn update_user(&self, id: RecordId, changes: UserChanges) -> Result<User, Error>;

    /// Remove one user, returning the removed record.
    async fn delete_user(&self, id: RecordId) -> Result<User, Error>;

    /// Remove every listed user.
    ///
    /// # Errors
    ///
    /// - `invalid_request` when `ids` is empty.
    /// - `not_found` with `notFoundIds` details when any id is absent.
    async fn delete_users(&self, ids: Vec<RecordId>) -> Result<BulkDeleteOutcome, Error>;
}
