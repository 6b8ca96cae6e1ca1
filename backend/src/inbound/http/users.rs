//! User API handlers, including the bulk endpoints.
//!
//! ```text
//! GET    /api/users
//! GET    /api/users/{id}
//! POST   /api/users      {"name":"Ada","email":"ada@example.com"}
//! PUT    /api/users/{id} {"email":"lovelace@example.com"}
//! DELETE /api/users/{id}
//! POST   /api/users/bulk {"users":[{"name":"A","email":"a@x.com"}]}
//! DELETE /api/users/bulk {"ids":[1,2]}
//! ```
//!
//! The bulk routes must be registered before `/users/{id}` so `bulk` is not
//! captured as an id.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::UserChanges;
use crate::domain::{Error, NewUser, RecordId, User};
use crate::inbound::http::{ApiResult, DeletedResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{RecordPath, parse_record_id};

/// Request body for `POST /api/users` and each bulk entry.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<UserRequest> for NewUser {
    fn from(value: UserRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
        }
    }
}

impl From<UserRequest> for UserChanges {
    fn from(value: UserRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
        }
    }
}

/// Request body for `POST /api/users/bulk`.
///
/// `users` is kept loosely typed so a missing or non-array value yields the
/// bulk-specific validation error.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BulkCreateRequest {
    #[serde(default)]
    pub users: Option<serde_json::Value>,
}

/// Response body for `POST /api/users/bulk`.
#[derive(Debug, Serialize, Deserialize)]
pub struct BulkCreateResponse {
    pub users: Vec<User>,
}

/// Request body for `DELETE /api/users/bulk`.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BulkDeleteRequest {
    #[serde(default)]
    pub ids: Option<serde_json::Value>,
}

/// Response body for `DELETE /api/users/bulk`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
    pub message: String,
    pub deleted_count: usize,
    pub deleted_ids: Vec<RecordId>,
}

fn parse_bulk_users(raw: Option<serde_json::Value>) -> Result<Vec<NewUser>, Error> {
    let not_an_array = || {
        Error::invalid_request("users array is required and must not be empty")
            .with_details(json!({ "field": "users", "code": "invalid_batch" }))
    };
    let entries = match raw {
        Some(serde_json::Value::Array(entries)) => entries,
        _ => return Err(not_an_array()),
    };

    // Entries that are not objects are kept as empty input so the domain
    // reports their index alongside other invalid entries.
    Ok(entries
        .into_iter()
        .map(|entry| {
            serde_json::from_value::<UserRequest>(entry)
                .map(NewUser::from)
                .unwrap_or_default()
        })
        .collect())
}

fn parse_bulk_ids(raw: Option<serde_json::Value>) -> Result<Vec<RecordId>, Error> {
    let invalid = || {
        Error::invalid_request("user ids array is required and must contain integer ids")
            .with_details(json!({ "field": "ids", "code": "invalid_ids" }))
    };
    match raw {
        Some(value @ serde_json::Value::Array(_)) => {
            serde_json::from_value::<Vec<RecordId>>(value).map_err(|_| invalid())
        }
        _ => Err(invalid()),
    }
}

/// List every user in insertion order.
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    Ok(web::Json(state.users.list_users().await?))
}

/// Fetch one user.
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<RecordPath>,
) -> ApiResult<web::Json<User>> {
    let id = parse_record_id(&path.id)?;
    Ok(web::Json(state.users.get_user(id).await?))
}

/// Create a user; responds `201 Created`.
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users_command
        .create_user(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(user))
}

/// Shallow-merge `name` and/or `email` onto a user.
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<RecordPath>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<User>> {
    let id = parse_record_id(&path.id)?;
    let user = state
        .users_command
        .update_user(id, payload.into_inner().into())
        .await?;
    Ok(web::Json(user))
}

/// Remove a user.
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<RecordPath>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let id = parse_record_id(&path.id)?;
    state.users_command.delete_user(id).await?;
    Ok(web::Json(DeletedResponse::new("User deleted successfully")))
}

/// Create several users at once, or none if any entry is invalid.
#[post("/users/bulk")]
pub async fn create_users(
    state: web::Data<HttpState>,
    payload: web::Json<BulkCreateRequest>,
) -> ApiResult<HttpResponse> {
    let entries = parse_bulk_users(payload.into_inner().users)?;
    let users = state.users_command.create_users(entries).await?;
    Ok(HttpResponse::Created().json(BulkCreateResponse { users }))
}

/// Delete several users at once, or none if any id is absent.
#[delete("/users/bulk")]
pub async fn delete_users(
    state: web::Data<HttpState>,
    payload: web::Json<BulkDeleteRequest>,
) -> ApiResult<web::Json<BulkDeleteResponse>> {
    let ids = parse_bulk_ids(payload.into_inner().ids)?;
    let outcome = state.users_command.delete_users(ids).await?;
    Ok(web::Json(BulkDeleteResponse {
        message: "Users deleted successfully".to_owned(),
        deleted_count: outcome.deleted_count(),
        deleted_ids: outcome.deleted_ids,
    }))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
