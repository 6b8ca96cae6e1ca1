//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::{App, web};
use chrono::{DateTime, Utc};

use crate::Trace;
use crate::domain::ports::NoOpLearnerSnapshots;
use crate::domain::{Collection, LearnerService, UserService, seed_learners};
use crate::inbound::http::configure;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;
use crate::test_support::clock::MutableClock;

/// Fixed start instant for deterministic timestamps.
pub fn fixture_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_717_200_000, 0).unwrap_or_default()
}

/// State backed by real in-memory services, seeded with the default learners
/// and an empty user collection.
pub fn in_memory_state(clock: Arc<MutableClock>) -> HttpState {
    let learners = Arc::new(LearnerService::new(
        Collection::from_records(seed_learners()),
        Arc::new(NoOpLearnerSnapshots),
        clock.clone(),
    ));
    let users = Arc::new(UserService::new(clock.clone()));
    HttpState::from_services(learners, users, clock)
}

/// Full application wired like the server: trace middleware, routes and
/// a ready health state.
pub fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    App::new()
        .app_data(web::Data::new(state))
        .app_data(health)
        .wrap(Trace)
        .configure(configure)
}
