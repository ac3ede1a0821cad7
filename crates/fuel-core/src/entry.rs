//! Recorded fuel-fill entries.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::measurement::{InputError, Measurement};

/// Error for an empty entry identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("entry ID cannot be empty")]
pub struct EntryIdError;

/// Errors for a stored entry that does not satisfy the entry invariants.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EntryError {
    /// Distance or volume is not a positive finite number.
    #[error("entry {id}: {source}")]
    Measurement {
        id: EntryId,
        #[source]
        source: InputError,
    },

    /// The stored consumption does not match distance and volume.
    #[error("entry {id}: stored consumption {stored} does not match computed {computed}")]
    ConsumptionMismatch {
        id: EntryId,
        stored: f64,
        computed: f64,
    },
}

/// A validated entry identifier.
///
/// Generated IDs are UUID v7 strings: the leading bits encode the creation
/// time in milliseconds, the rest is random, so IDs created in the same
/// millisecond still differ. IDs read back from storage are accepted as any
/// non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryId(String);

impl EntryId {
    /// Creates an ID after validation.
    pub fn new(id: impl Into<String>) -> Result<Self, EntryIdError> {
        let id = id.into();
        if id.is_empty() {
            return Err(EntryIdError);
        }
        Ok(Self(id))
    }

    /// Generates a fresh time-ordered ID.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EntryId {
    type Error = EntryIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntryId> for String {
    fn from(id: EntryId) -> Self {
        id.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One fuel-fill record.
///
/// `consumption` is derived from `kilometers` and `liters` when the entry is
/// built and cannot be changed afterwards. The serialized field order matches
/// the stored history format: `id`, `date`, `kilometers`, `liters`,
/// `consumption`. Deserialization rejects records whose distance or volume is
/// not positive, or whose consumption differs from the derived value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredEntry")]
pub struct ConsumptionEntry {
    id: EntryId,
    date: NaiveDate,
    kilometers: f64,
    liters: f64,
    consumption: f64,
}

/// Entry fields as read from storage, before validation.
#[derive(Deserialize)]
struct StoredEntry {
    id: EntryId,
    date: NaiveDate,
    kilometers: f64,
    liters: f64,
    consumption: f64,
}

/// Tolerance for stored consumption values written by other producers.
const CONSUMPTION_TOLERANCE: f64 = 1e-9;

impl TryFrom<StoredEntry> for ConsumptionEntry {
    type Error = EntryError;

    fn try_from(stored: StoredEntry) -> Result<Self, Self::Error> {
        let measurement = match Measurement::new(stored.kilometers, stored.liters) {
            Ok(measurement) => measurement,
            Err(source) => {
                return Err(EntryError::Measurement {
                    id: stored.id,
                    source,
                });
            }
        };
        let computed = measurement.consumption();
        if (computed - stored.consumption).abs() > CONSUMPTION_TOLERANCE {
            return Err(EntryError::ConsumptionMismatch {
                id: stored.id,
                stored: stored.consumption,
                computed,
            });
        }
        Ok(Self::with_id(stored.id, stored.date, measurement))
    }
}

impl ConsumptionEntry {
    /// Builds an entry with a freshly generated ID.
    pub fn record(date: NaiveDate, measurement: Measurement) -> Self {
        Self::with_id(EntryId::generate(), date, measurement)
    }

    /// Builds an entry with a caller-supplied ID.
    pub fn with_id(id: EntryId, date: NaiveDate, measurement: Measurement) -> Self {
        Self {
            id,
            date,
            kilometers: measurement.kilometers(),
            liters: measurement.liters(),
            consumption: measurement.consumption(),
        }
    }

    pub const fn id(&self) -> &EntryId {
        &self.id
    }

    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    pub const fn kilometers(&self) -> f64 {
        self.kilometers
    }

    pub const fn liters(&self) -> f64 {
        self.liters
    }

    /// Liters per 100 km, rounded to two decimals.
    pub const fn consumption(&self) -> f64 {
        self.consumption
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn record_derives_consumption() {
        let m = Measurement::new(500.0, 35.0).unwrap();
        let entry = ConsumptionEntry::record(date("2024-03-01"), m);

        assert!((entry.consumption() - 7.0).abs() < f64::EPSILON);
        assert!((entry.kilometers() - 500.0).abs() < f64::EPSILON);
        assert!((entry.liters() - 35.0).abs() < f64::EPSILON);
        assert_eq!(entry.date(), date("2024-03-01"));
    }

    #[test]
    fn generated_ids_are_unique() {
        let ids: std::collections::HashSet<_> = (0..1000).map(|_| EntryId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn generated_ids_are_uuid_v7() {
        let id = EntryId::generate();
        let parsed = Uuid::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
    }

    #[test]
    fn entry_id_rejects_empty() {
        assert_eq!(EntryId::new(""), Err(EntryIdError));
    }

    #[test]
    fn entry_serializes_in_storage_format() {
        let entry = ConsumptionEntry::with_id(
            EntryId::new("1709251200000").unwrap(),
            date("2024-03-01"),
            Measurement::new(500.0, 35.0).unwrap(),
        );

        let json = serde_json::to_string(&entry).unwrap();
        insta::assert_snapshot!(
            json,
            @r#"{"id":"1709251200000","date":"2024-03-01","kilometers":500.0,"liters":35.0,"consumption":7.0}"#
        );
    }

    #[test]
    fn entry_rejects_empty_id() {
        let json = r#"{
            "id": "",
            "date": "2024-03-01",
            "kilometers": 500,
            "liters": 35,
            "consumption": 7
        }"#;
        let result: Result<ConsumptionEntry, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn entry_rejects_non_positive_distance() {
        let json = r#"{"id":"a","date":"2024-01-01","kilometers":-100,"liters":35,"consumption":99}"#;
        let err = serde_json::from_str::<ConsumptionEntry>(json).unwrap_err();
        assert!(err.to_string().contains("distance must be greater than zero"));
    }

    #[test]
    fn entry_rejects_inconsistent_consumption() {
        let json = r#"{"id":"a","date":"2024-01-01","kilometers":500,"liters":35,"consumption":5}"#;
        let err = serde_json::from_str::<ConsumptionEntry>(json).unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn entry_accepts_integer_numbers() {
        let json = r#"{"id":"a","date":"2024-01-01","kilometers":500,"liters":35,"consumption":7}"#;
        let entry: ConsumptionEntry = serde_json::from_str(json).unwrap();
        assert!((entry.consumption() - 7.0).abs() < f64::EPSILON);
    }
}
