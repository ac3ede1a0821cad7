//! The persisted entry history.

use fuel_core::{ConsumptionEntry, EntryId, History};

use crate::StoreError;
use crate::storage::Storage;

/// Slot key the history is stored under unless configured otherwise.
pub const DEFAULT_KEY: &str = "consumptionHistory";

/// How the history is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Storage slot holding the serialized history.
    pub key: String,
    /// Clear the slot when the history becomes empty. When `false`, an
    /// emptied history is not written and the last non-empty content stays in
    /// the slot.
    pub persist_empty: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_KEY.to_string(),
            persist_empty: true,
        }
    }
}

/// An entry history that is written back to storage after every change.
#[derive(Debug)]
pub struct HistoryStore<S> {
    storage: S,
    options: StoreOptions,
    history: History,
}

impl<S: Storage> HistoryStore<S> {
    /// Loads the history from `storage`.
    ///
    /// A missing slot yields an empty history. So does a slot whose content is
    /// not a valid entry array: undecodable JSON, an entry with a non-positive
    /// distance or volume, a consumption that does not match them, or two
    /// entries sharing an ID. The bad content is logged and left in place
    /// until the next write replaces it.
    pub fn load(storage: S, options: StoreOptions) -> Result<Self, StoreError> {
        let history = match storage.get_item(&options.key)? {
            None => History::new(),
            Some(raw) => match decode(&raw) {
                Ok(history) => history,
                Err(err) => {
                    tracing::warn!(key = %options.key, %err, "stored history is unreadable, starting empty");
                    History::new()
                }
            },
        };
        tracing::debug!(key = %options.key, entries = history.len(), "loaded history");

        Ok(Self {
            storage,
            options,
            history,
        })
    }

    /// Writes the current history to storage, replacing the previous content.
    ///
    /// An empty history clears the slot, or leaves it untouched when
    /// `persist_empty` is off.
    pub fn save(&mut self) -> Result<(), StoreError> {
        if self.history.is_empty() {
            if !self.options.persist_empty {
                tracing::debug!(key = %self.options.key, "history is empty, skipping write");
                return Ok(());
            }
            return self.storage.remove_item(&self.options.key);
        }
        let json = serde_json::to_string(self.history.entries())?;
        self.storage.set_item(&self.options.key, &json)
    }

    /// Adds an entry and persists the history.
    ///
    /// If the write fails the entry is taken back out, so the history still
    /// matches storage.
    pub fn insert(&mut self, entry: ConsumptionEntry) -> Result<(), StoreError> {
        let previous = self.history.clone();
        let id = entry.id().clone();
        self.history.insert(entry)?;
        self.commit(previous)?;
        tracing::info!(%id, average = self.history.average(), "recorded entry");
        Ok(())
    }

    /// Removes the entry with `id` and persists the history.
    ///
    /// Returns `Ok(None)` without writing anything if no entry has that ID. If
    /// the write fails the entry is restored in its original position.
    pub fn delete(&mut self, id: &EntryId) -> Result<Option<ConsumptionEntry>, StoreError> {
        let previous = self.history.clone();
        let Some(removed) = self.history.remove(id) else {
            tracing::debug!(%id, "no entry to delete");
            return Ok(None);
        };
        self.commit(previous)?;
        tracing::info!(%id, average = self.history.average(), "deleted entry");
        Ok(Some(removed))
    }

    /// Saves the mutated history, restoring `previous` if the write fails.
    fn commit(&mut self, previous: History) -> Result<(), StoreError> {
        if let Err(err) = self.save() {
            tracing::warn!(key = %self.options.key, %err, "write failed, history rolled back");
            self.history = previous;
            return Err(err);
        }
        Ok(())
    }

    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[ConsumptionEntry] {
        self.history.entries()
    }

    /// Average consumption, `0.0` when empty.
    pub const fn average(&self) -> f64 {
        self.history.average()
    }

    pub const fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

/// Decodes and validates a stored entry array.
fn decode(raw: &str) -> Result<History, StoreError> {
    let entries: Vec<ConsumptionEntry> = serde_json::from_str(raw)?;
    Ok(History::from_entries(entries)?)
}
