//! Ordered in-memory record collection.
//!
//! Records keep insertion order and are addressed by scanning for `id`
//! equality. Collections hold a handful of entries, so no index is kept.

use super::{IdSequence, Record, RecordId, SequenceExhausted};

/// Identifiers that were requested but are not present in the collection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("records not found: {ids:?}")]
pub struct MissingRecords {
    /// Absent identifiers, in request order.
    pub ids: Vec<RecordId>,
}

/// Two records in a loaded batch share an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("duplicate record id {id}")]
pub struct DuplicateRecord {
    /// The repeated identifier.
    pub id: RecordId,
}

/// Ordered collection owning its records and identifier sequence.
///
/// # Examples
/// ```
/// use lmis_backend::domain::{Collection, Record, RecordId};
///
/// #[derive(Clone)]
/// struct Note {
///     id: RecordId,
/// }
///
/// impl Record for Note {
///     fn id(&self) -> RecordId {
///         self.id
///     }
/// }
///
/// let mut notes = Collection::new();
/// let first = notes.insert_with(|id| Note { id })?.id();
/// assert_eq!(first, RecordId::new(1));
/// assert!(notes.remove(first).is_some());
/// assert_eq!(notes.insert_with(|id| Note { id })?.id(), RecordId::new(2));
/// # Ok::<(), lmis_backend::domain::SequenceExhausted>(())
/// ```
#[derive(Debug, Clone)]
pub struct Collection<T> {
    records: Vec<T>,
    ids: IdSequence,
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Collection<T> {
    /// Empty collection; the first allocated identifier is `1`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            ids: IdSequence::new(),
        }
    }

    /// Collection seeded with trusted `records`, allocating past their
    /// largest id.
    #[must_use]
    pub fn from_records(records: Vec<T>) -> Self {
        let ids = IdSequence::starting_after(records.iter().map(Record::id));
        Self { records, ids }
    }

    /// Collection built from untrusted `records`.
    ///
    /// # Errors
    /// Returns [`DuplicateRecord`] naming the first repeated identifier.
    pub fn try_from_records(records: Vec<T>) -> Result<Self, DuplicateRecord> {
        for (index, record) in records.iter().enumerate() {
            let id = record.id();
            if records[..index].iter().any(|earlier| earlier.id() == id) {
                return Err(DuplicateRecord { id });
            }
        }
        Ok(Self::from_records(records))
    }

    /// All records in insertion order.
    #[must_use]
    pub fn list(&self) -> &[T] {
        &self.records
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose id matches.
    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Allocate an identifier, build the record with it and append it.
    ///
    /// # Errors
    /// Returns [`SequenceExhausted`] when no identifier is left; nothing is
    /// appended.
    pub fn insert_with(
        &mut self,
        build: impl FnOnce(RecordId) -> T,
    ) -> Result<&T, SequenceExhausted> {
        let id = self.ids.allocate()?;
        let index = self.records.len();
        self.records.push(build(id));
        Ok(&self.records[index])
    }

    /// Append a batch, allocating consecutive identifiers in input order.
    ///
    /// # Errors
    /// Returns [`SequenceExhausted`] when the batch does not fit in the
    /// remaining identifiers; nothing is appended.
    pub fn insert_all_with<D>(
        &mut self,
        drafts: impl IntoIterator<Item = D>,
        mut build: impl FnMut(RecordId, D) -> T,
    ) -> Result<Vec<T>, SequenceExhausted> {
        let mut ids = self.ids.clone();
        let allocated = drafts
            .into_iter()
            .map(|draft| ids.allocate().map(|id| (id, draft)))
            .collect::<Result<Vec<_>, _>>()?;

        self.ids = ids;
        let start = self.records.len();
        self.records
            .extend(allocated.into_iter().map(|(id, draft)| build(id, draft)));
        Ok(self.records[start..].to_vec())
    }

    /// Apply `change` to the first record with a matching id.
    pub fn update_with(&mut self, id: RecordId, change: impl FnOnce(&mut T)) -> Option<&T> {
        let record = self.records.iter_mut().find(|record| record.id() == id)?;
        change(record);
        Some(record)
    }

    /// Remove the first record with a matching id.
    pub fn remove(&mut self, id: RecordId) -> Option<T> {
        let index = self.records.iter().position(|record| record.id() == id)?;
        Some(self.records.remove(index))
    }

    /// Remove every listed record, or none of them.
    ///
    /// Duplicate identifiers in `ids` are collapsed. When any identifier is
    /// absent the collection is left untouched and the absent ids returned.
    pub fn remove_all(&mut self, ids: &[RecordId]) -> Result<Vec<T>, MissingRecords> {
        let mut wanted: Vec<RecordId> = Vec::with_capacity(ids.len());
        for id in ids {
            if !wanted.contains(id) {
                wanted.push(*id);
            }
        }

        let missing: Vec<RecordId> = wanted
            .iter()
            .copied()
            .filter(|id| self.get(*id).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(MissingRecords { ids: missing });
        }

        Ok(wanted
            .into_iter()
            .filter_map(|id| self.remove(id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: RecordId,
        label: String,
    }

    impl Record for Item {
        fn id(&self) -> RecordId {
            self.id
        }
    }

    fn item(id: u64, label: &str) -> Item {
        Item {
            id: RecordId::new(id),
            label: label.to_owned(),
        }
    }

    fn labels(collection: &Collection<Item>) -> Vec<&str> {
        collection
            .list()
            .iter()
            .map(|item| item.label.as_str())
            .collect()
    }

    #[fixture]
    fn seeded() -> Collection<Item> {
        Collection::from_records(vec![item(1, "a"), item(2, "b"), item(3, "c")])
    }

    #[rstest]
    fn insert_appends_in_order() {
        let mut items = Collection::new();
        items
            .insert_with(|id| Item {
                id,
                label: "first".to_owned(),
            })
            .expect("id available");
        items
            .insert_with(|id| Item {
                id,
                label: "second".to_owned(),
            })
            .expect("id available");

        assert_eq!(labels(&items), ["first", "second"]);
        assert_eq!(items.list()[1].id, RecordId::new(2));
    }

    #[rstest]
    fn ids_are_not_reused_after_delete() {
        let mut items = Collection::new();
        let first = items
            .insert_with(|id| item(id.get(), "a"))
            .expect("id available")
            .id();
        items
            .insert_with(|id| item(id.get(), "b"))
            .expect("id available");
        items.remove(first);

        let third = items
            .insert_with(|id| item(id.get(), "c"))
            .expect("id available")
            .id();
        assert_eq!(third, RecordId::new(3));
    }

    #[rstest]
    fn seeded_collection_allocates_past_max(mut seeded: Collection<Item>) {
        let id = seeded
            .insert_with(|id| item(id.get(), "d"))
            .expect("id available")
            .id();
        assert_eq!(id, RecordId::new(4));
    }

    #[rstest]
    fn get_returns_none_for_absent_id(seeded: Collection<Item>) {
        assert!(seeded.get(RecordId::new(99)).is_none());
        assert_eq!(
            seeded.get(RecordId::new(2)).map(|item| item.label.as_str()),
            Some("b")
        );
    }

    #[rstest]
    fn update_changes_only_the_target(mut seeded: Collection<Item>) {
        let updated = seeded
            .update_with(RecordId::new(2), |item| item.label = "B".to_owned())
            .cloned();

        assert_eq!(updated, Some(item(2, "B")));
        assert_eq!(labels(&seeded), ["a", "B", "c"]);
    }

    #[rstest]
    fn update_of_absent_id_is_none(mut seeded: Collection<Item>) {
        let mut called = false;
        let result = seeded.update_with(RecordId::new(7), |_| called = true);
        assert!(result.is_none());
        assert!(!called);
    }

    #[rstest]
    fn insert_all_allocates_consecutive_ids(mut seeded: Collection<Item>) {
        let created = seeded
            .insert_all_with(["x", "y"], |id, label| item(id.get(), label))
            .expect("ids available");

        assert_eq!(created, vec![item(4, "x"), item(5, "y")]);
        assert_eq!(seeded.len(), 5);
    }

    #[rstest]
    fn exhausted_sequence_rejects_inserts() {
        let mut items = Collection::from_records(vec![item(u64::MAX, "last")]);

        let single = items.insert_with(|id| item(id.get(), "x")).map(|_| ());
        let batch = items.insert_all_with(["y"], |id, label| item(id.get(), label));

        assert_eq!(single, Err(SequenceExhausted));
        assert_eq!(batch, Err(SequenceExhausted));
        assert_eq!(labels(&items), ["last"]);
    }

    #[rstest]
    fn batch_that_overruns_the_sequence_inserts_nothing() {
        let mut items = Collection::from_records(vec![item(u64::MAX - 1, "a")]);

        let batch = items.insert_all_with(["x", "y"], |id, label| item(id.get(), label));
        assert_eq!(batch, Err(SequenceExhausted));
        assert_eq!(labels(&items), ["a"]);

        let last = items
            .insert_with(|id| item(id.get(), "x"))
            .expect("one id left")
            .id();
        assert_eq!(last, RecordId::new(u64::MAX));
    }

    #[rstest]
    fn try_from_records_rejects_duplicate_ids() {
        let result = Collection::try_from_records(vec![item(1, "a"), item(2, "b"), item(1, "c")]);

        assert_eq!(
            result.map(|items| items.len()),
            Err(DuplicateRecord {
                id: RecordId::new(1)
            })
        );
    }

    #[rstest]
    fn try_from_records_accepts_unique_ids() {
        let items = Collection::try_from_records(vec![item(4, "a"), item(2, "b")])
            .expect("unique ids");

        assert_eq!(labels(&items), ["a", "b"]);
    }

    #[rstest]
    fn remove_all_deletes_every_listed_record(mut seeded: Collection<Item>) {
        let removed = seeded
            .remove_all(&[RecordId::new(3), RecordId::new(1), RecordId::new(3)])
            .expect("all ids present");

        assert_eq!(removed, vec![item(3, "c"), item(1, "a")]);
        assert_eq!(labels(&seeded), ["b"]);
    }

    #[rstest]
    fn remove_all_is_all_or_nothing(mut seeded: Collection<Item>) {
        let error = seeded
            .remove_all(&[RecordId::new(1), RecordId::new(42), RecordId::new(43)])
            .expect_err("missing ids reject the batch");

        assert_eq!(error.ids, vec![RecordId::new(42), RecordId::new(43)]);
        assert_eq!(labels(&seeded), ["a", "b", "c"]);
    }
}
