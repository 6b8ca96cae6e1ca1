//! Outbound adapters implementing the driven domain ports.
//!
//! - **persistence**: JSON file snapshots of the learner collection.
//!
//! Adapters translate between domain types and storage formats and contain
//! no business logic.

pub mod persistence;
