//! User domain service.
//!
//! Users live only in memory. Bulk operations validate the whole request
//! before touching the collection.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::ports::{BulkDeleteOutcome, UserChanges, UsersCommand, UsersQuery};
use crate::domain::{
    Collection, Error, NewUser, Record, RecordId, SequenceExhausted, User, UserDraft, UserPatch,
};

/// User service implementing the user driving ports.
pub struct UserService {
    users: Mutex<Collection<User>>,
    clock: Arc<dyn Clock>,
}

impl UserService {
    /// Service over an empty collection.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_users(Collection::new(), clock)
    }

    /// Service over an existing collection.
    pub fn with_users(users: Collection<User>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users: Mutex::new(users),
            clock,
        }
    }
}

fn ids_exhausted(_: SequenceExhausted) -> Error {
    Error::internal("user id sequence exhausted")
}

fn user_not_found(id: RecordId) -> Error {
    Error::not_found(format!("user {id} not found"))
}

#[async_trait]
impl UsersQuery for UserService {
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        Ok(self.users.lock().await.list().to_vec())
    }

    async fn get_user(&self, id: RecordId) -> Result<User, Error> {
        self.users
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| user_not_found(id))
    }
}

#[async_trait]
impl UsersCommand for UserService {
    async fn create_user(&self, user: NewUser) -> Result<User, Error> {
        let draft = UserDraft::try_from(user)?;
        let now = self.clock.utc();
        let created = self
            .users
            .lock()
            .await
            .insert_with(|id| User::create(id, draft, now))
            .cloned()
            .map_err(ids_exhausted)?;
        info!(user_id = %created.id(), "user created");
        Ok(created)
    }

    async fn create_users(&self, users: Vec<NewUser>) -> Result<Vec<User>, Error> {
        let drafts = UserDraft::try_from_batch(users)?;
        let now = self.clock.utc();
        let created = self
            .users
            .lock()
            .await
            .insert_all_with(drafts, |id, draft| User::create(id, draft, now))
            .map_err(ids_exhausted)?;
        info!(count = created.len(), "users created in bulk");
        Ok(created)
    }

    async fn update_user(&self, id: RecordId, changes: UserChanges) -> Result<User, Error> {
        let UserChanges { name, email } = changes;
        let patch = UserPatch::try_new(name, email)?;
        let updated = self
            .users
            .lock()
            .await
            .update_with(id, |user| user.apply(patch))
            .cloned()
            .ok_or_else(|| user_not_found(id))?;
        info!(user_id = %id, "user updated");
        Ok(updated)
    }

    async fn delete_user(&self, id: RecordId) -> Result<User, Error> {
        let removed = self
            .users
            .lock()
            .await
            .remove(id)
            .ok_or_else(|| user_not_found(id))?;
        info!(user_id = %id, "user deleted");
        Ok(removed)
    }

    async fn delete_users(&self, ids: Vec<RecordId>) -> Result<BulkDeleteOutcome, Error> {
        if ids.is_empty() {
            return Err(
                Error::invalid_request("user ids array must not be empty")
                    .with_details(json!({ "field": "ids", "code": "empty_batch" })),
            );
        }

        let removed = self.users.lock().await.remove_all(&ids).map_err(|missing| {
            Error::not_found("some users not found")
                .with_details(json!({ "notFoundIds": missing.ids, "code": "users_not_found" }))
        })?;
        let deleted_ids: Vec<RecordId> = removed.iter().map(Record::id).collect();
        info!(count = deleted_ids.len(), "users deleted in bulk");
        Ok(BulkDeleteOutcome { deleted_ids })
    }
}
