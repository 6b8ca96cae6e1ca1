//! Learner API handlers.
//!
//! ```text
//! GET    /api/learners
//! GET    /api/learners/{id}
//! POST   /api/learners {"name":"Ada","email":"ada@example.com","course":"Rust"}
//! PUT    /api/learners/{id} {"progress":80}
//! DELETE /api/learners/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Learner, LearnerChanges, LearnerStatus, NewLearner};
use crate::inbound::http::{ApiResult, DeletedResponse};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{RecordPath, parse_record_id};

/// Request body for `POST /api/learners`.
///
/// Client-supplied `id`, `progress` and timestamps are ignored.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLearnerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
    pub status: Option<LearnerStatus>,
    pub grade: Option<String>,
}

impl From<CreateLearnerRequest> for NewLearner {
    fn from(value: CreateLearnerRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            course: value.course,
            status: value.status,
            grade: value.grade,
        }
    }
}

/// Request body for `PUT /api/learners/{id}`.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLearnerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
    pub status: Option<LearnerStatus>,
    pub grade: Option<String>,
    pub progress: Option<i64>,
}

impl From<UpdateLearnerRequest> for LearnerChanges {
    fn from(value: UpdateLearnerRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            course: value.course,
            status: value.status,
            grade: value.grade,
            progress: value.progress,
        }
    }
}

/// List every learner in insertion order.
#[get("/learners")]
pub async fn list_learners(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Learner>>> {
    Ok(web::Json(state.learners.list_learners().await?))
}

/// Fetch one learner.
#[get("/learners/{id}")]
pub async fn get_learner(
    state: web::Data<HttpState>,
    path: web::Path<RecordPath>,
) -> ApiResult<web::Json<Learner>> {
    let id = parse_record_id(&path.id)?;
    Ok(web::Json(state.learners.get_learner(id).await?))
}

/// Enrol a learner; responds `201 Created` with the stored record.
#[post("/learners")]
pub async fn create_learner(
    state: web::Data<HttpState>,
    payload: web::Json<CreateLearnerRequest>,
) -> ApiResult<HttpResponse> {
    let learner = state
        .learners_command
        .create_learner(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(learner))
}

/// Shallow-merge the supplied fields onto a learner.
#[put("/learners/{id}")]
pub async fn update_learner(
    state: web::Data<HttpState>,
    path: web::Path<RecordPath>,
    payload: web::Json<UpdateLearnerRequest>,
) -> ApiResult<web::Json<Learner>> {
    let id = parse_record_id(&path.id)?;
    let learner = state
        .learners_command
        .update_learner(id, payload.into_inner().into())
        .await?;
    Ok(web::Json(learner))
}

/// Remove a learner.
#[delete("/learners/{id}")]
pub async fn delete_learner(
    state: web::Data<HttpState>,
    path: web::Path<RecordPath>,
) -> ApiResult<web::Json<DeletedResponse>> {
    let id = parse_record_id(&path.id)?;
    state.learners_command.delete_learner(id).await?;
    Ok(web::Json(DeletedResponse::new("Learner deleted successfully")))
}

#[cfg(test)]
#[path = "learners_tests.rs"]
mod tests;
