//! Core domain logic for the fuel consumption tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Measurement: validating distance/volume input and deriving L/100km
//! - Entry form: the single-calculation and history-recording flows
//! - Bands: classifying a consumption value against a threshold table
//! - History: the date-ordered collection of entries and its average

pub mod band;
pub mod entry;
pub mod form;
pub mod history;
pub mod measurement;

pub use band::{Band, BandError, BandTable};
pub use entry::{ConsumptionEntry, EntryError, EntryId, EntryIdError};
pub use form::{EntryForm, Reading};
pub use history::{History, HistoryError, average_consumption};
pub use measurement::{InputError, Measurement, round2};
