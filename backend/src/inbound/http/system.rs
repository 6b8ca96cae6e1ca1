//! Miscellaneous endpoints: a plain-text greeting and an API smoke test.

use actix_web::{HttpResponse, get, http::header::ContentType, web};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::inbound::http::state::HttpState;

/// Greeting served at `/`.
pub const GREETING: &str = "Hello from the LMIS backend!";

/// Body of `GET /api/test`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiStatus {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(GREETING)
}

/// Confirm the API scope is reachable.
#[get("/test")]
pub async fn api_test(state: web::Data<HttpState>) -> web::Json<ApiStatus> {
    web::Json(ApiStatus {
        message: "API is working!".to_owned(),
        timestamp: state.clock.utc(),
    })
}
