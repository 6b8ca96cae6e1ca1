//! Monotonic identifier allocation.
//!
//! The sequence only moves forward. Deleting records never rewinds it, so an
//! identifier is handed out at most once per collection lifetime. Once
//! `u64::MAX` has been handed out or observed the sequence is exhausted and
//! refuses further allocations.

use super::RecordId;

/// Every identifier up to `u64::MAX` is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("identifier sequence exhausted")]
pub struct SequenceExhausted;

/// Monotonic counter producing collection-unique [`RecordId`]s.
///
/// # Examples
/// ```
/// use lmis_backend::domain::{IdSequence, RecordId};
///
/// let mut ids = IdSequence::starting_after([RecordId::new(3), RecordId::new(9)]);
/// assert_eq!(ids.allocate(), Ok(RecordId::new(10)));
/// assert_eq!(ids.allocate(), Ok(RecordId::new(11)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: Option<u64>,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: Some(1) }
    }
}

impl IdSequence {
    /// Sequence for an empty collection; the first identifier is `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence primed past the largest of `existing`.
    pub fn starting_after(existing: impl IntoIterator<Item = RecordId>) -> Self {
        let mut sequence = Self::new();
        for id in existing {
            sequence.observe(id);
        }
        sequence
    }

    /// Identifier the next call to [`IdSequence::allocate`] returns, if any.
    #[must_use]
    pub fn peek(&self) -> Option<RecordId> {
        self.next.map(RecordId::new)
    }

    /// Hand out the next identifier.
    ///
    /// # Errors
    /// Returns [`SequenceExhausted`] once `u64::MAX` has been used.
    pub fn allocate(&mut self) -> Result<RecordId, SequenceExhausted> {
        let current = self.next.ok_or(SequenceExhausted)?;
        self.next = current.checked_add(1);
        Ok(RecordId::new(current))
    }

    /// Ensure future allocations never collide with `id`.
    pub fn observe(&mut self, id: RecordId) {
        if self.next.is_some_and(|next| id.get() >= next) {
            self.next = id.get().checked_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_sequence_starts_at_one() {
        let mut ids = IdSequence::new();
        assert_eq!(ids.allocate(), Ok(RecordId::new(1)));
        assert_eq!(ids.allocate(), Ok(RecordId::new(2)));
    }

    #[rstest]
    #[case(&[], 1)]
    #[case(&[1, 2, 3], 4)]
    #[case(&[5, 2], 6)]
    #[case(&[0], 1)]
    fn starting_after_skips_existing(#[case] existing: &[u64], #[case] expected: u64) {
        let ids = IdSequence::starting_after(existing.iter().copied().map(RecordId::new));
        assert_eq!(ids.peek(), Some(RecordId::new(expected)));
    }

    #[rstest]
    fn observing_a_smaller_id_does_not_rewind() {
        let mut ids = IdSequence::starting_after([RecordId::new(10)]);
        ids.observe(RecordId::new(2));
        assert_eq!(ids.allocate(), Ok(RecordId::new(11)));
    }

    #[rstest]
    fn observing_the_largest_id_exhausts_the_sequence() {
        let mut ids = IdSequence::starting_after([RecordId::new(u64::MAX)]);

        assert_eq!(ids.peek(), None);
        assert_eq!(ids.allocate(), Err(SequenceExhausted));
        ids.observe(RecordId::new(3));
        assert_eq!(ids.allocate(), Err(SequenceExhausted));
    }

    #[rstest]
    fn the_largest_id_is_handed_out_once() {
        let mut ids = IdSequence::starting_after([RecordId::new(u64::MAX - 1)]);

        assert_eq!(ids.allocate(), Ok(RecordId::new(u64::MAX)));
        assert_eq!(ids.allocate(), Err(SequenceExhausted));
    }
}
