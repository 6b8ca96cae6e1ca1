//! Learner domain service.
//!
//! Owns the learner collection and mirrors it through a
//! [`LearnerSnapshotRepository`] after every mutation. The collection lock is
//! held across the whole read-modify-persist cycle, and a failed save restores
//! the collection to its state before the mutation.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::domain::ports::{
    LearnerSnapshotError, LearnerSnapshotRepository, LearnersCommand, LearnersQuery,
};
use crate::domain::validation::FieldError;
use crate::domain::{
    Collection, DuplicateRecord, Error, Learner, LearnerChanges, LearnerDraft, LearnerPatch,
    NewLearner, Record, RecordId, SequenceExhausted, seed_learners,
};

/// Why a stored snapshot was set aside in favour of the seed.
#[derive(Debug, thiserror::Error)]
enum RejectedSnapshot {
    #[error(transparent)]
    Duplicate(#[from] DuplicateRecord),
    #[error("learner {id}: {source}")]
    Invalid { id: RecordId, source: FieldError },
}

fn restore(learners: Vec<Learner>) -> Result<Collection<Learner>, RejectedSnapshot> {
    for learner in &learners {
        learner
            .check_invariants()
            .map_err(|source| RejectedSnapshot::Invalid {
                id: learner.id(),
                source,
            })?;
    }
    Ok(Collection::try_from_records(learners)?)
}

/// Learner service implementing the learner driving ports.
pub struct LearnerService<S> {
    learners: Mutex<Collection<Learner>>,
    snapshots: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> LearnerService<S> {
    /// Build a service over an existing collection.
    pub fn new(learners: Collection<Learner>, snapshots: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            learners: Mutex::new(learners),
            snapshots,
            clock,
        }
    }
}

impl<S> LearnerService<S>
where
    S: LearnerSnapshotRepository,
{
    /// Build a service from the stored snapshot.
    ///
    /// Falls back to [`seed_learners`] when nothing has been saved yet, the
    /// snapshot cannot be read, or its learners break a record invariant
    /// (blank text or a repeated id).
    pub async fn load(snapshots: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        let learners = match snapshots.load().await {
            Ok(Some(learners)) => {
                let count = learners.len();
                match restore(learners) {
                    Ok(learners) => {
                        info!(count, "loaded learner snapshot");
                        learners
                    }
                    Err(err) => {
                        warn!(error = %err, "learner snapshot invalid; starting from seed learners");
                        Collection::from_records(seed_learners())
                    }
                }
            }
            Ok(None) => {
                info!("no learner snapshot found; starting from seed learners");
                Collection::from_records(seed_learners())
            }
            Err(err) => {
                warn!(error = %err, "learner snapshot unusable; starting from seed learners");
                Collection::from_records(seed_learners())
            }
        };
        Self::new(learners, snapshots, clock)
    }

    async fn commit<R, F>(&self, mutate: F) -> Result<R, Error>
    where
        R: Send,
        F: FnOnce(&mut Collection<Learner>) -> Result<R, Error> + Send,
    {
        let mut learners = self.learners.lock().await;
        let before = learners.clone();
        let outcome = mutate(&mut *learners)?;

        if let Err(err) = self.snapshots.save(learners.list()).await {
            *learners = before;
            error!(error = %err, "learner snapshot save failed; change rolled back");
            return Err(map_snapshot_error(err));
        }
        Ok(outcome)
    }
}

fn map_snapshot_error(error: LearnerSnapshotError) -> Error {
    Error::internal(format!("failed to persist learners: {error}"))
}

fn ids_exhausted(_: SequenceExhausted) -> Error {
    Error::internal("learner id sequence exhausted")
}

fn learner_not_found(id: RecordId) -> Error {
    Error::not_found(format!("learner {id} not found"))
}

#[async_trait]
impl<S> LearnersQuery for LearnerService<S>
where
    S: LearnerSnapshotRepository,
{
    async fn list_learners(&self) -> Result<Vec<Learner>, Error> {
        Ok(self.learners.lock().await.list().to_vec())
    }

    async fn get_learner(&self, id: RecordId) -> Result<Learner, Error> {
        self.learners
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| learner_not_found(id))
    }
}

#[async_trait]
impl<S> LearnersCommand for LearnerService<S>
where
    S: LearnerSnapshotRepository,
{
    async fn create_learner(&self, learner: NewLearner) -> Result<Learner, Error> {
        let draft = LearnerDraft::try_from(learner)?;
        let now = self.clock.utc();
        let created = self
            .commit(|learners| {
                learners
                    .insert_with(|id| Learner::enrol(id, draft, now))
                    .cloned()
                    .map_err(ids_exhausted)
            })
            .await?;
        info!(learner_id = %created.id(), "learner created");
        Ok(created)
    }

    async fn update_learner(
        &self,
        id: RecordId,
        changes: LearnerChanges,
    ) -> Result<Learner, Error> {
        let patch = LearnerPatch::try_from(changes)?;
        let now = self.clock.utc();
        let updated = self
            .commit(|learners| {
                learners
                    .update_with(id, |learner| learner.apply(patch, now))
                    .cloned()
                    .ok_or_else(|| learner_not_found(id))
            })
            .await?;
        info!(learner_id = %id, "learner updated");
        Ok(updated)
    }

    async fn delete_learner(&self, id: RecordId) -> Result<Learner, Error> {
        let removed = self
            .commit(|learners| learners.remove(id).ok_or_else(|| learner_not_found(id)))
            .await?;
        info!(learner_id = %id, "learner deleted");
        Ok(removed)
    }
}
