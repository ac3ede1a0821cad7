//! Delete command for removing an entry by ID.

use std::io::Write;

use anyhow::{Context, Result};
use fuel_core::EntryId;
use fuel_store::{HistoryStore, Storage};

/// Runs the delete command. An unknown ID is reported but is not an error.
pub fn run<W: Write, S: Storage>(
    writer: &mut W,
    store: &mut HistoryStore<S>,
    id: &str,
) -> Result<()> {
    let id = EntryId::new(id.trim()).context("invalid entry ID")?;

    match store.delete(&id).context("failed to save history")? {
        Some(removed) => {
            writeln!(writer, "Deleted {} ({})", removed.id(), removed.date())?;
            writeln!(writer, "Average: {} L/100km", store.average())?;
        }
        None => writeln!(writer, "No entry with ID {id}")?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use fuel_core::{ConsumptionEntry, Measurement};
    use fuel_store::{MemoryStorage, StoreOptions};

    use insta::assert_snapshot;

    fn sample_store() -> HistoryStore<MemoryStorage> {
        let mut store = HistoryStore::load(MemoryStorage::new(), StoreOptions::default()).unwrap();
        for (id, date, liters) in [("a", "2024-01-01", 4.0), ("b", "2024-02-01", 6.0)] {
            let entry = ConsumptionEntry::with_id(
                EntryId::new(id).unwrap(),
                date.parse::<NaiveDate>().unwrap(),
                Measurement::new(100.0, liters).unwrap(),
            );
            store.insert(entry).unwrap();
        }
        store
    }

    fn delete(store: &mut HistoryStore<MemoryStorage>, id: &str) -> String {
        let mut output = Vec::new();
        run(&mut output, store, id).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn delete_removes_entry() {
        let mut store = sample_store();
        assert_snapshot!(delete(&mut store, "b"), @r"
        Deleted b (2024-02-01)
        Average: 4 L/100km
        ");
        assert_eq!(store.entries().len(), 1);
        assert_eq!(store.entries()[0].id().as_str(), "a");
    }

    #[test]
    fn delete_unknown_id_leaves_history() {
        let mut store = sample_store();
        assert_snapshot!(delete(&mut store, "zzz"), @"No entry with ID zzz");
        assert_eq!(store.entries().len(), 2);
    }

    #[test]
    fn delete_empty_id_is_an_error() {
        let mut store = sample_store();
        let mut output = Vec::new();
        assert!(run(&mut output, &mut store, "  ").is_err());
    }
}
