//! HTTP inbound adapter exposing the REST endpoints.
//!
//! [`configure`] is the single route table, shared by the server and tests.

pub mod error;
pub mod health;
pub mod learners;
pub mod state;
pub mod system;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Error;

pub use error::ApiResult;

/// Confirmation returned by the single-record delete endpoints.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeletedResponse {
    pub message: String,
}

impl DeletedResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

/// Register every route plus the JSON 404 fallback.
///
/// Callers provide `web::Data<HttpState>` and `web::Data<HealthState>`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use lmis_backend::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(system::index)
        .service(health::ready)
        .service(health::live)
        .service(
            web::scope("/api")
                .service(system::api_test)
                .service(learners::list_learners)
                .service(learners::create_learner)
                .service(learners::get_learner)
                .service(learners::update_learner)
                .service(learners::delete_learner)
                .service(users::create_users)
                .service(users::delete_users)
                .service(users::list_users)
                .service(users::create_user)
                .service(users::get_user)
                .service(users::update_user)
                .service(users::delete_user),
        )
        .default_service(web::to(route_not_found));
}

async fn route_not_found(request: actix_web::HttpRequest) -> ApiResult<actix_web::HttpResponse> {
    debug!(method = %request.method(), path = request.path(), "no route matched");
    Err(Error::not_found("Route not found"))
}
