//! Learner records and their enrolment lifecycle.
//!
//! Learners follow the single-course schema: one optional `course`, a flat
//! completion percentage and a three-state status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{FieldError, require_text, usable_text};
use super::{Record, RecordId};

/// Enrolment status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearnerStatus {
    /// Currently taking the course.
    #[default]
    Active,
    /// Finished the course.
    Completed,
    /// Left before finishing.
    Dropped,
}

/// Course completion percentage in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Progress(u8);

impl Progress {
    /// Upper bound, inclusive.
    pub const MAX: u8 = 100;

    /// Validate a raw percentage.
    ///
    /// # Examples
    /// ```
    /// use lmis_backend::domain::Progress;
    ///
    /// assert_eq!(Progress::try_new(75).map(Progress::get), Ok(75));
    /// assert!(Progress::try_new(101).is_err());
    /// assert!(Progress::try_new(-1).is_err());
    /// ```
    pub fn try_new(value: i64) -> Result<Self, FieldError> {
        u8::try_from(value)
            .ok()
            .filter(|percent| *percent <= Self::MAX)
            .map(Self)
            .ok_or(FieldError::OutOfRange {
                field: "progress",
                value,
            })
    }

    /// Raw percentage.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Progress {
    type Error = FieldError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(i64::from(value))
    }
}

impl From<Progress> for u8 {
    fn from(value: Progress) -> Self {
        value.0
    }
}

/// Stored learner.
///
/// ## Invariants
/// - `name` and `email` are non-blank.
/// - `last_accessed` is restamped by every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Learner {
    id: RecordId,
    name: String,
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    course: Option<String>,
    enrollment_date: DateTime<Utc>,
    #[serde(default)]
    status: LearnerStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    grade: Option<String>,
    #[serde(default)]
    progress: Progress,
    last_accessed: DateTime<Utc>,
}

impl Learner {
    /// Enrol a learner from a validated draft. Progress starts at zero.
    #[must_use]
    pub fn enrol(id: RecordId, draft: LearnerDraft, now: DateTime<Utc>) -> Self {
        let LearnerDraft {
            name,
            email,
            course,
            status,
            grade,
        } = draft;
        Self {
            id,
            name,
            email,
            course,
            enrollment_date: now,
            status,
            grade,
            progress: Progress::default(),
            last_accessed: now,
        }
    }

    /// Full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Enrolled course, if any.
    pub fn course(&self) -> Option<&str> {
        self.course.as_deref()
    }

    /// Enrolment timestamp.
    pub fn enrollment_date(&self) -> DateTime<Utc> {
        self.enrollment_date
    }

    /// Enrolment status.
    pub fn status(&self) -> LearnerStatus {
        self.status
    }

    /// Final grade, if recorded.
    pub fn grade(&self) -> Option<&str> {
        self.grade.as_deref()
    }

    /// Completion percentage.
    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Timestamp of the last mutation.
    pub fn last_accessed(&self) -> DateTime<Utc> {
        self.last_accessed
    }

    /// Check the invariants deserialisation cannot enforce.
    ///
    /// # Errors
    /// Returns [`FieldError::Blank`] naming the first blank text field.
    pub fn check_invariants(&self) -> Result<(), FieldError> {
        for (field, value) in [("name", &self.name), ("email", &self.email)] {
            if value.trim().is_empty() {
                return Err(FieldError::Blank { field });
            }
        }
        Ok(())
    }

    /// Shallow-merge `patch` and restamp `last_accessed`.
    pub fn apply(&mut self, patch: LearnerPatch, now: DateTime<Utc>) {
        let LearnerPatch {
            name,
            email,
            course,
            status,
            grade,
            progress,
        } = patch;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if course.is_some() {
            self.course = course;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if grade.is_some() {
            self.grade = grade;
        }
        if let Some(progress) = progress {
            self.progress = progress;
        }
        self.last_accessed = now;
    }
}

impl Record for Learner {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Unvalidated learner fields as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewLearner {
    pub name: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
    pub status: Option<LearnerStatus>,
    pub grade: Option<String>,
}

/// Validated learner creation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnerDraft {
    name: String,
    email: String,
    course: Option<String>,
    status: LearnerStatus,
    grade: Option<String>,
}

impl TryFrom<NewLearner> for LearnerDraft {
    type Error = FieldError;

    fn try_from(value: NewLearner) -> Result<Self, Self::Error> {
        let NewLearner {
            name,
            email,
            course,
            status,
            grade,
        } = value;
        Ok(Self {
            name: require_text("name", name)?,
            email: require_text("email", email)?,
            course,
            status: status.unwrap_or_default(),
            grade,
        })
    }
}

/// Unvalidated learner update fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LearnerChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
    pub status: Option<LearnerStatus>,
    pub grade: Option<String>,
    pub progress: Option<i64>,
}

/// Validated partial update; at least one field is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnerPatch {
    name: Option<String>,
    email: Option<String>,
    course: Option<String>,
    status: Option<LearnerStatus>,
    grade: Option<String>,
    progress: Option<Progress>,
}

impl TryFrom<LearnerChanges> for LearnerPatch {
    type Error = FieldError;

    fn try_from(value: LearnerChanges) -> Result<Self, Self::Error> {
        let LearnerChanges {
            name,
            email,
            course,
            status,
            grade,
            progress,
        } = value;
        let changes = LearnerChanges {
            name: usable_text(name),
            email: usable_text(email),
            course,
            status,
            grade,
            progress,
        };
        if changes == LearnerChanges::default() {
            return Err(FieldError::EmptyUpdate {
                fields: "name, email, course, status, grade or progress",
            });
        }
        Ok(Self {
            name: changes.name,
            email: changes.email,
            course: changes.course,
            status: changes.status,
            grade: changes.grade,
            progress: changes.progress.map(Progress::try_new).transpose()?,
        })
    }
}

fn seed_timestamp(seconds: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(seconds, 0).unwrap_or_default()
}

/// Learners served when no snapshot file is available.
#[must_use]
pub fn seed_learners() -> Vec<Learner> {
    vec![
        Learner {
            id: RecordId::new(1),
            name: "John Doe".to_owned(),
            email: "john@example.com".to_owned(),
            course: Some("TypeScript Fundamentals".to_owned()),
            enrollment_date: seed_timestamp(1_705_276_800),
            status: LearnerStatus::Active,
            grade: None,
            progress: Progress(75),
            last_accessed: seed_timestamp(1_710_930_600),
        },
        Learner {
            id: RecordId::new(2),
            name: "Jane Smith".to_owned(),
            email: "jane@example.com".to_owned(),
            course: Some("Advanced TypeScript".to_owned()),
            enrollment_date: seed_timestamp(1_706_745_600),
            status: LearnerStatus::Completed,
            grade: Some("A".to_owned()),
            progress: Progress(100),
            last_accessed: seed_timestamp(1_710_863_100),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    #[fixture]
    fn now() -> DateTime<Utc> {
        seed_timestamp(1_717_200_000)
    }

    #[fixture]
    fn draft() -> LearnerDraft {
        LearnerDraft::try_from(NewLearner {
            name: Some("Ada".to_owned()),
            email: Some("ada@example.com".to_owned()),
            course: Some("Rust".to_owned()),
            ..NewLearner::default()
        })
        .expect("valid draft")
    }

    #[rstest]
    fn enrol_resets_progress_and_stamps_dates(draft: LearnerDraft, now: DateTime<Utc>) {
        let learner = Learner::enrol(RecordId::new(3), draft, now);

        assert_eq!(learner.progress().get(), 0);
        assert_eq!(learner.status(), LearnerStatus::Active);
        assert_eq!(learner.enrollment_date(), now);
        assert_eq!(learner.last_accessed(), now);
    }

    #[rstest]
    fn apply_merges_and_restamps(draft: LearnerDraft, now: DateTime<Utc>) {
        let mut learner = Learner::enrol(RecordId::new(1), draft, now);
        let later = now + TimeDelta::minutes(5);
        let patch = LearnerPatch::try_from(LearnerChanges {
            progress: Some(40),
            status: Some(LearnerStatus::Completed),
            ..LearnerChanges::default()
        })
        .expect("valid patch");

        learner.apply(patch, later);

        assert_eq!(learner.name(), "Ada");
        assert_eq!(learner.course(), Some("Rust"));
        assert_eq!(learner.progress().get(), 40);
        assert_eq!(learner.status(), LearnerStatus::Completed);
        assert_eq!(learner.enrollment_date(), now);
        assert_eq!(learner.last_accessed(), later);
    }

    #[rstest]
    #[case(json!(""), json!("a@x.com"), Some("name"))]
    #[case(json!("Ada"), json!(" "), Some("email"))]
    #[case(json!("Ada"), json!("a@x.com"), None)]
    fn loaded_learner_invariants(
        #[case] name: Value,
        #[case] email: Value,
        #[case] blank: Option<&'static str>,
    ) {
        let learner: Learner = serde_json::from_value(json!({
            "id": 1,
            "name": name,
            "email": email,
            "enrollmentDate": "2024-01-15T00:00:00Z",
            "lastAccessed": "2024-01-15T00:00:00Z"
        }))
        .expect("learner shape");

        let expected = blank.map_or(Ok(()), |field| Err(FieldError::Blank { field }));
        assert_eq!(learner.check_invariants(), expected);
    }

    #[rstest]
    fn empty_changes_are_rejected() {
        let result = LearnerPatch::try_from(LearnerChanges::default());
        assert!(matches!(result, Err(FieldError::EmptyUpdate { .. })));
    }

    #[rstest]
    #[case(Some(""), None)]
    #[case(Some("  "), Some(" "))]
    fn blank_text_alone_is_an_empty_update(
        #[case] name: Option<&str>,
        #[case] email: Option<&str>,
    ) {
        let result = LearnerPatch::try_from(LearnerChanges {
            name: name.map(str::to_owned),
            email: email.map(str::to_owned),
            ..LearnerChanges::default()
        });
        assert!(matches!(result, Err(FieldError::EmptyUpdate { .. })));
    }

    #[rstest]
    fn blank_name_keeps_the_stored_name(draft: LearnerDraft, now: DateTime<Utc>) {
        let mut learner = Learner::enrol(RecordId::new(1), draft, now);
        let patch = LearnerPatch::try_from(LearnerChanges {
            name: Some(String::new()),
            course: Some("Go".to_owned()),
            ..LearnerChanges::default()
        })
        .expect("course alone is a usable update");

        learner.apply(patch, now);

        assert_eq!(learner.name(), "Ada");
        assert_eq!(learner.course(), Some("Go"));
    }

    #[rstest]
    #[case(101)]
    #[case(-5)]
    fn out_of_range_progress_is_rejected(#[case] progress: i64) {
        let result = LearnerPatch::try_from(LearnerChanges {
            progress: Some(progress),
            ..LearnerChanges::default()
        });
        assert_eq!(
            result,
            Err(FieldError::OutOfRange {
                field: "progress",
                value: progress
            })
        );
    }

    #[rstest]
    fn serialised_shape_matches_wire_format(draft: LearnerDraft, now: DateTime<Utc>) {
        let learner = Learner::enrol(RecordId::new(5), draft, now);
        let value = serde_json::to_value(&learner).expect("serialise learner");

        assert_eq!(
            value,
            json!({
                "id": 5,
                "name": "Ada",
                "email": "ada@example.com",
                "course": "Rust",
                "enrollmentDate": "2024-06-01T00:00:00Z",
                "status": "active",
                "progress": 0,
                "lastAccessed": "2024-06-01T00:00:00Z",
            })
        );
    }

    #[rstest]
    fn deserialising_rejects_progress_over_one_hundred() {
        let raw = json!({
            "id": 1,
            "name": "A",
            "email": "a@x.com",
            "enrollmentDate": "2024-06-01T00:00:00Z",
            "progress": 150,
            "lastAccessed": "2024-06-01T00:00:00Z",
        });
        assert!(serde_json::from_value::<Learner>(raw).is_err());
    }

    #[rstest]
    fn seed_ids_are_unique() {
        let seeds = seed_learners();
        assert_eq!(seeds.len(), 2);
        assert_ne!(seeds[0].id(), seeds[1].id());
    }
}
