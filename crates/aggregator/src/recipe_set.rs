//! Insertion-ordered collection of records, deduplicated by id.

use model::{DetailRecord, RecipeId};
use std::collections::HashSet;

/// Accumulates records across several queries.
///
/// The first record seen for an id wins; later ones are dropped.
#[derive(Debug, Default)]
pub struct RecipeSet {
    records: Vec<DetailRecord>,
    seen: HashSet<RecipeId>,
}

impl RecipeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `record` unless its id is already present.
    ///
    /// Returns `true` if the record was added.
    pub fn insert(&mut self, record: DetailRecord) -> bool {
        if self.seen.contains(&record.id) {
            return false;
        }
        self.seen.insert(record.id.clone());
        self.records.push(record);
        true
    }

    /// Add every record not already present; returns how many were added.
    pub fn extend(&mut self, records: impl IntoIterator<Item = DetailRecord>) -> usize {
        records
            .into_iter()
            .map(|record| self.insert(record))
            .filter(|added| *added)
            .count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_vec(self) -> Vec<DetailRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_rejects_duplicate_ids() {
        let mut set = RecipeSet::new();
        assert!(set.insert(DetailRecord::new("1", "Dal fry")));
        assert!(set.insert(DetailRecord::new("2", "Kedgeree")));
        assert!(!set.insert(DetailRecord::new("1", "Dal fry (again)")));

        assert_eq!(set.len(), 2);
        assert!(set.contains("1"));
        assert!(!set.contains("3"));
    }

    #[test]
    fn test_first_record_wins_and_order_is_kept() {
        let mut set = RecipeSet::new();
        let added = set.extend(vec![
            DetailRecord::new("b", "First b"),
            DetailRecord::new("a", "First a"),
            DetailRecord::new("b", "Second b"),
        ]);
        assert_eq!(added, 2);

        let records = set.into_vec();
        assert_eq!(records[0].name, "First b");
        assert_eq!(records[1].name, "First a");
    }

    #[test]
    fn test_empty_set() {
        let set = RecipeSet::new();
        assert!(set.is_empty());
        assert!(set.into_vec().is_empty());
    }
}
