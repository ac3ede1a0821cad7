//! History persistence for the fuel consumption tracker.
//!
//! The history lives in a single string slot of a key-value [`Storage`],
//! serialized as a JSON array of entries:
//!
//! ```json
//! [{"id":"...","date":"2024-03-01","kilometers":500.0,"liters":35.0,"consumption":7.0}]
//! ```
//!
//! The record shape is not versioned. Adding optional fields is safe; renaming
//! or removing fields makes previously stored data unreadable, and unreadable
//! data is treated as an empty history.

mod storage;
mod store;

use std::path::PathBuf;

use thiserror::Error;

pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{DEFAULT_KEY, HistoryStore, StoreOptions};

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The slot key cannot be used as a file name.
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
    /// Reading or writing a slot failed.
    #[error("storage I/O error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The history could not be serialized.
    #[error("failed to serialize history")]
    Serialize(#[from] serde_json::Error),
    /// The history rejected a mutation.
    #[error(transparent)]
    History(#[from] fuel_core::HistoryError),
}
