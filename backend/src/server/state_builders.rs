//! Build domain services and the HTTP state from resolved settings.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use lmis_backend::domain::ports::NoOpLearnerSnapshots;
use lmis_backend::domain::{LearnerService, UserService};
use lmis_backend::inbound::http::state::HttpState;
use lmis_backend::outbound::persistence::JsonFileLearnerSnapshots;
use lmis_backend::settings::ServerSettings;

/// Load the learner collection and assemble handler state.
///
/// The learner service is file-backed when a snapshot path is configured and
/// memory-only otherwise.
pub async fn build_http_state(settings: &ServerSettings) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let users = Arc::new(UserService::new(clock.clone()));

    match &settings.learners_file {
        Some(path) => {
            info!(path = %path.display(), "learner persistence enabled");
            let snapshots = Arc::new(JsonFileLearnerSnapshots::new(path.clone()));
            let learners = Arc::new(LearnerService::load(snapshots, clock.clone()).await);
            HttpState::from_services(learners, users, clock)
        }
        None => {
            info!("learner persistence disabled; collections are memory-only");
            let learners =
                Arc::new(LearnerService::load(Arc::new(NoOpLearnerSnapshots), clock.clone()).await);
            HttpState::from_services(learners, users, clock)
        }
    }
}
