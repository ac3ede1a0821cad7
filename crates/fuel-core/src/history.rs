//! The date-ordered entry collection and its running average.

use std::collections::HashSet;

use thiserror::Error;

use crate::entry::{ConsumptionEntry, EntryId};
use crate::measurement::round2;

/// History mutation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// An entry with this ID is already present.
    #[error("duplicate entry ID: {0}")]
    DuplicateId(EntryId),
}

/// Mean consumption over `entries`, rounded to two decimals.
///
/// Returns exactly `0.0` for an empty slice.
pub fn average_consumption(entries: &[ConsumptionEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    let total: f64 = entries.iter().map(ConsumptionEntry::consumption).sum();
    #[expect(
        clippy::cast_precision_loss,
        reason = "entry counts stay far below 2^52"
    )]
    let count = entries.len() as f64;
    round2(total / count)
}

/// Entries sorted by date, newest first, with a cached average.
///
/// Every mutating method recomputes the average before returning, so the
/// collection and the average are never observed out of step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    entries: Vec<ConsumptionEntry>,
    average: f64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from entries in any order.
    ///
    /// Entries sharing a date keep their relative order. Fails if two entries
    /// share an ID.
    pub fn from_entries(mut entries: Vec<ConsumptionEntry>) -> Result<Self, HistoryError> {
        let mut seen = HashSet::with_capacity(entries.len());
        if let Some(duplicate) = entries.iter().find(|entry| !seen.insert(entry.id())) {
            return Err(HistoryError::DuplicateId(duplicate.id().clone()));
        }
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.date()));
        let average = average_consumption(&entries);
        Ok(Self { entries, average })
    }

    /// Inserts an entry ahead of every older entry and of existing entries
    /// on the same date.
    pub fn insert(&mut self, entry: ConsumptionEntry) -> Result<(), HistoryError> {
        if self.get(entry.id()).is_some() {
            return Err(HistoryError::DuplicateId(entry.id().clone()));
        }
        let at = self
            .entries
            .partition_point(|existing| existing.date() > entry.date());
        self.entries.insert(at, entry);
        self.average = average_consumption(&self.entries);
        Ok(())
    }

    /// Removes the entry with `id`, returning it. Unknown IDs are a no-op.
    pub fn remove(&mut self, id: &EntryId) -> Option<ConsumptionEntry> {
        let index = self.entries.iter().position(|entry| entry.id() == id)?;
        let removed = self.entries.remove(index);
        self.average = average_consumption(&self.entries);
        Some(removed)
    }

    pub fn get(&self, id: &EntryId) -> Option<&ConsumptionEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[ConsumptionEntry] {
        &self.entries
    }

    /// Average consumption, `0.0` when empty.
    pub const fn average(&self) -> f64 {
        self.average
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use crate::measurement::Measurement;

    fn entry(id: &str, date: &str, km: f64, liters: f64) -> ConsumptionEntry {
        ConsumptionEntry::with_id(
            EntryId::new(id).unwrap(),
            date.parse::<NaiveDate>().unwrap(),
            Measurement::new(km, liters).unwrap(),
        )
    }

    fn ids(history: &History) -> Vec<&str> {
        history
            .entries()
            .iter()
            .map(|entry| entry.id().as_str())
            .collect()
    }

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average_consumption(&[]).to_bits(), 0.0_f64.to_bits());
        assert_eq!(History::new().average().to_bits(), 0.0_f64.to_bits());
    }

    #[test]
    fn average_of_four_and_six_is_five() {
        let entries = [
            entry("a", "2024-01-01", 100.0, 4.0),
            entry("b", "2024-01-02", 100.0, 6.0),
        ];
        assert!((average_consumption(&entries) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn average_is_rounded() {
        let entries = [
            entry("a", "2024-01-01", 100.0, 5.0),
            entry("b", "2024-01-02", 100.0, 5.0),
            entry("c", "2024-01-03", 100.0, 6.0),
        ];
        // 16 / 3 = 5.333...
        assert!((average_consumption(&entries) - 5.33).abs() < f64::EPSILON);
    }

    #[test]
    fn insert_keeps_newest_first_regardless_of_order() {
        let mut forward = History::new();
        forward.insert(entry("jan", "2024-01-01", 100.0, 5.0)).unwrap();
        forward.insert(entry("mar", "2024-03-01", 100.0, 6.0)).unwrap();

        let mut backward = History::new();
        backward.insert(entry("mar", "2024-03-01", 100.0, 6.0)).unwrap();
        backward.insert(entry("jan", "2024-01-01", 100.0, 5.0)).unwrap();

        assert_eq!(ids(&forward), ["mar", "jan"]);
        assert_eq!(ids(&backward), ["mar", "jan"]);
    }

    #[test]
    fn insert_places_new_entry_first_among_same_date() {
        let mut history = History::new();
        history.insert(entry("old", "2024-02-01", 100.0, 5.0)).unwrap();
        history.insert(entry("first", "2024-03-01", 100.0, 5.0)).unwrap();
        history.insert(entry("second", "2024-03-01", 100.0, 5.0)).unwrap();

        assert_eq!(ids(&history), ["second", "first", "old"]);
    }

    #[test]
    fn insert_updates_average() {
        let mut history = History::new();
        history.insert(entry("a", "2024-01-01", 100.0, 4.0)).unwrap();
        assert!((history.average() - 4.0).abs() < f64::EPSILON);
        history.insert(entry("b", "2024-01-02", 100.0, 6.0)).unwrap();
        assert!((history.average() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut history = History::new();
        history.insert(entry("a", "2024-01-01", 100.0, 4.0)).unwrap();
        let err = history
            .insert(entry("a", "2024-02-01", 100.0, 6.0))
            .unwrap_err();

        assert_eq!(err, HistoryError::DuplicateId(EntryId::new("a").unwrap()));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn remove_takes_exactly_one_entry() {
        let mut history = History::from_entries(vec![
            entry("a", "2024-01-01", 100.0, 4.0),
            entry("b", "2024-02-01", 100.0, 6.0),
            entry("c", "2024-03-01", 100.0, 8.0),
        ])
        .unwrap();

        let removed = history.remove(&EntryId::new("b").unwrap()).unwrap();
        assert_eq!(removed.id().as_str(), "b");
        assert_eq!(ids(&history), ["c", "a"]);
        assert!((history.average() - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut history =
            History::from_entries(vec![entry("a", "2024-01-01", 100.0, 4.0)]).unwrap();
        let before = history.clone();

        assert!(history.remove(&EntryId::new("missing").unwrap()).is_none());
        assert_eq!(history, before);
    }

    #[test]
    fn remove_last_entry_resets_average() {
        let mut history =
            History::from_entries(vec![entry("a", "2024-01-01", 100.0, 4.0)]).unwrap();
        history.remove(&EntryId::new("a").unwrap());
        assert!(history.is_empty());
        assert_eq!(history.average().to_bits(), 0.0_f64.to_bits());
    }

    #[test]
    fn from_entries_sorts_stably() {
        let history = History::from_entries(vec![
            entry("x", "2024-01-01", 100.0, 4.0),
            entry("y", "2024-05-01", 100.0, 4.0),
            entry("z", "2024-01-01", 100.0, 4.0),
        ])
        .unwrap();
        assert_eq!(ids(&history), ["y", "x", "z"]);
    }

    #[test]
    fn from_entries_rejects_duplicate_ids() {
        let err = History::from_entries(vec![
            entry("a", "2024-01-01", 100.0, 5.0),
            entry("b", "2024-02-01", 100.0, 6.0),
            entry("a", "2024-03-01", 100.0, 7.0),
        ])
        .unwrap_err();
        assert_eq!(err, HistoryError::DuplicateId(EntryId::new("a").unwrap()));
    }
}
