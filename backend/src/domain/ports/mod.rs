//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Query`, `*Command`) are what inbound adapters call.
//! Driven ports (`*Repository`) are what the domain calls out to.

mod macros;
pub(crate) use macros::define_port_error;

mod learner_snapshot_repository;
mod learners_command;
mod learners_query;
mod users_command;
mod users_query;

#[cfg(test)]
pub use learner_snapshot_repository::MockLearnerSnapshotRepository;
pub use learner_snapshot_repository::{
    LearnerSnapshotError, LearnerSnapshotRepository, NoOpLearnerSnapshots,
};
#[cfg(test)]
pub use learners_command::MockLearnersCommand;
pub use learners_command::LearnersCommand;
#[cfg(test)]
pub use learners_query::MockLearnersQuery;
pub use learners_query::LearnersQuery;
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::{BulkDeleteOutcome, UserChanges, UsersCommand};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
