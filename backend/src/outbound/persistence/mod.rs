//! File-backed persistence adapters.

mod json_file_learner_snapshots;

pub use json_file_learner_snapshots::JsonFileLearnerSnapshots;
