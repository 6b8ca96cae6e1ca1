//! Shared HTTP adapter state.
//!
//! Handlers receive this state through `web::Data` and depend only on the
//! domain ports and a clock, so tests can swap in mocks or in-memory services.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{LearnersCommand, LearnersQuery, UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub learners: Arc<dyn LearnersQuery>,
    pub learners_command: Arc<dyn LearnersCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Build state from services that implement both halves of each port pair.
    /// `clock` stamps responses that are not backed by a service.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use lmis_backend::domain::ports::NoOpLearnerSnapshots;
    /// use lmis_backend::domain::{Collection, LearnerService, UserService};
    /// use lmis_backend::inbound::http::state::HttpState;
    /// use mockable::DefaultClock;
    ///
    /// let learners = Arc::new(LearnerService::new(
    ///     Collection::new(),
    ///     Arc::new(NoOpLearnerSnapshots),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let users = Arc::new(UserService::new(Arc::new(DefaultClock)));
    /// let _state = HttpState::from_services(learners, users, Arc::new(DefaultClock));
    /// ```
    pub fn from_services<L, U>(learners: Arc<L>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self
    where
        L: LearnersQuery + LearnersCommand + 'static,
        U: UsersQuery + UsersCommand + 'static,
    {
        Self {
            learners: learners.clone(),
            learners_command: learners,
            users: users.clone(),
            users_command: users,
            clock,
        }
    }
}
