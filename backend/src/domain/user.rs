//! Generic user records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::validation::{FieldError, require_text, usable_text};
use super::{Error, Record, RecordId};

/// Stored user.
///
/// ## Invariants
/// - `name` and `email` are non-blank.
/// - `created_at` is stamped once, at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: RecordId,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl User {
    /// Build a user from a validated draft.
    #[must_use]
    pub fn create(id: RecordId, draft: UserDraft, now: DateTime<Utc>) -> Self {
        let UserDraft { name, email } = draft;
        Self {
            id,
            name,
            email,
            created_at: now,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Overwrite the supplied fields, keeping the rest.
    pub fn apply(&mut self, patch: UserPatch) {
        let UserPatch { name, email } = patch;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
    }
}

impl Record for User {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Unvalidated user fields as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Validated user creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    name: String,
    email: String,
}

impl UserDraft {
    /// Validate a whole batch, rejecting it if any entry is invalid.
    ///
    /// The error details list the zero-based indices of invalid entries.
    ///
    /// # Examples
    /// ```
    /// use lmis_backend::domain::{NewUser, UserDraft};
    ///
    /// let batch = vec![
    ///     NewUser { name: Some("A".into()), email: Some("a@x.com".into()) },
    ///     NewUser { name: None, email: Some("b@x.com".into()) },
    /// ];
    /// let error = UserDraft::try_from_batch(batch).expect_err("second entry is invalid");
    /// assert_eq!(error.details().and_then(|d| d.get("invalidIndices")), Some(&serde_json::json!([1])));
    /// ```
    pub fn try_from_batch(entries: Vec<NewUser>) -> Result<Vec<Self>, Error> {
        if entries.is_empty() {
            return Err(Error::invalid_request("users array must not be empty")
                .with_details(json!({ "field": "users", "code": "empty_batch" })));
        }

        let mut drafts = Vec::with_capacity(entries.len());
        let mut invalid = Vec::new();
        for (index, entry) in entries.into_iter().enumerate() {
            match Self::try_from(entry) {
                Ok(draft) => drafts.push(draft),
                Err(_) => invalid.push(index),
            }
        }

        if invalid.is_empty() {
            Ok(drafts)
        } else {
            Err(Error::invalid_request("all users must have name and email")
                .with_details(json!({ "invalidIndices": invalid, "code": "invalid_batch" })))
        }
    }
}

impl TryFrom<NewUser> for UserDraft {
    type Error = FieldError;

    fn try_from(value: NewUser) -> Result<Self, Self::Error> {
        Ok(Self {
            name: require_text("name", value.name)?,
            email: require_text("email", value.email)?,
        })
    }
}

/// Validated partial update; at least one field is set.
///
/// Blank values are dropped, so the stored value survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPatch {
    name: Option<String>,
    email: Option<String>,
}

impl UserPatch {
    /// Validate update fields.
    ///
    /// # Examples
    /// ```
    /// use lmis_backend::domain::UserPatch;
    ///
    /// assert!(UserPatch::try_new(Some(String::new()), Some("b@x.com".into())).is_ok());
    /// assert!(UserPatch::try_new(Some(" ".into()), None).is_err());
    /// ```
    pub fn try_new(name: Option<String>, email: Option<String>) -> Result<Self, FieldError> {
        let name = usable_text(name);
        let email = usable_text(email);
        if name.is_none() && email.is_none() {
            return Err(FieldError::EmptyUpdate {
                fields: "name or email",
            });
        }
        Ok(Self { name, email })
    }
}
