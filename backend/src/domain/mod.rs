//! Domain primitives, aggregates and services.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: the error payload every adapter renders.
//! - `Learner` / `User`: the two independent record collections.
//! - `Collection` / `IdSequence`: ordered storage with monotonic ids.
//! - `LearnerService` / `UserService`: implementations of the driving ports.

pub mod error;
mod collection;
mod id_sequence;
mod learner;
mod learner_service;
pub mod ports;
mod record;
mod trace_id;
mod user;
mod user_service;
pub mod validation;

pub use self::collection::{Collection, DuplicateRecord, MissingRecords};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::id_sequence::{IdSequence, SequenceExhausted};
pub use self::learner::{
    Learner, LearnerChanges, LearnerDraft, LearnerPatch, LearnerStatus, NewLearner, Progress,
    seed_learners,
};
pub use self::learner_service::LearnerService;
pub use self::record::{Record, RecordId};
pub use self::trace_id::TraceId;
pub use self::user::{NewUser, User, UserDraft, UserPatch};
pub use self::user_service::UserService;

/// Convenient result alias for handlers and services.
///
/// # Examples
/// ```
/// use lmis_backend::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<u64> {
///     Err(Error::not_found("nothing here"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
