//! Append-only, insertion-ordered storage for one domain.

use std::slice;

/// Ordered log of records for one monitoring domain.
///
/// Insertion order is chronological order is display order. Records are
/// never mutated or removed; a record's position is its only handle. The
/// only mutator is crate-private so that every record goes through
/// [`MonitoringLog::append`](crate::MonitoringLog::append).
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationStore<R> {
    records: Vec<R>,
}

impl<R> Default for ObservationStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ObservationStore<R> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub(crate) fn append(&mut self, record: R) {
        self.records.push(record);
    }

    /// All records, oldest first.
    pub fn all(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at a 0-based position.
    pub fn get(&self, position: usize) -> Option<&R> {
        self.records.get(position)
    }

    /// Most recently appended record.
    pub fn last(&self) -> Option<&R> {
        self.records.last()
    }

    pub fn iter(&self) -> slice::Iter<'_, R> {
        self.records.iter()
    }
}

impl<'a, R> IntoIterator for &'a ObservationStore<R> {
    type Item = &'a R;
    type IntoIter = slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store: ObservationStore<u32> = ObservationStore::new();
        assert!(store.is_empty());
        assert!(store.last().is_none());
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut store = ObservationStore::new();
        for value in [3, 1, 2] {
            store.append(value);
        }
        assert_eq!(store.all(), &[3, 1, 2]);
        assert_eq!(store.get(1), Some(&1));
        assert_eq!(store.last(), Some(&2));
        assert_eq!(store.iter().count(), 3);
    }
}
