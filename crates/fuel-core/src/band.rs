//! Qualitative consumption bands.
//!
//! A [`BandTable`] is an ordered list of bands. A value belongs to the first
//! band whose limit admits it; the last band has no limit and catches the
//! rest. Bands are display-only and carry no stored meaning.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from constructing a band table.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BandError {
    /// The table has no bands.
    #[error("band table cannot be empty")]
    Empty,

    /// A band sets both `below` and `at_most`.
    #[error("band {label:?} sets both `below` and `at_most`")]
    ConflictingLimits { label: String },

    /// A band other than the last one has no limit.
    #[error("band {label:?} has no limit but is not the last band")]
    UnboundedBeforeEnd { label: String },

    /// The last band has a limit, so some values would match nothing.
    #[error("last band {label:?} must have no limit")]
    MissingCatchAll { label: String },

    /// A limit is NaN or infinite.
    #[error("band {label:?} has a non-finite limit")]
    NonFiniteLimit { label: String },

    /// A limit is lower than the one before it.
    #[error("band {label:?} limit {limit} is lower than the previous limit {previous}")]
    Unordered {
        label: String,
        limit: f64,
        previous: f64,
    },
}

/// One qualitative band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Short label, e.g. "moderate".
    pub label: String,
    /// Optional longer text shown alongside a result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Exclusive upper limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub below: Option<f64>,
    /// Inclusive upper limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_most: Option<f64>,
}

impl Band {
    /// A band admitting values strictly lower than `limit`.
    pub fn below(label: &str, limit: f64) -> Self {
        Self {
            label: label.to_string(),
            message: None,
            below: Some(limit),
            at_most: None,
        }
    }

    /// A band admitting values lower than or equal to `limit`.
    pub fn at_most(label: &str, limit: f64) -> Self {
        Self {
            label: label.to_string(),
            message: None,
            below: None,
            at_most: Some(limit),
        }
    }

    /// A band admitting every value.
    pub fn rest(label: &str) -> Self {
        Self {
            label: label.to_string(),
            message: None,
            below: None,
            at_most: None,
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    /// The text to show for a result: the message if set, else the label.
    pub fn text(&self) -> &str {
        self.message.as_deref().unwrap_or(&self.label)
    }

    fn limit(&self) -> Option<f64> {
        self.below.or(self.at_most)
    }

    fn admits(&self, value: f64) -> bool {
        match (self.below, self.at_most) {
            (Some(limit), _) => value < limit,
            (None, Some(limit)) => value <= limit,
            (None, None) => true,
        }
    }
}

/// An ordered, validated list of bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Band>", into = "Vec<Band>")]
pub struct BandTable {
    bounded: Vec<Band>,
    rest: Band,
}

impl BandTable {
    /// Builds a table after checking that every value maps to exactly one band.
    pub fn new(bands: Vec<Band>) -> Result<Self, BandError> {
        let Some((last, bounded)) = bands.split_last() else {
            return Err(BandError::Empty);
        };

        let mut previous: Option<f64> = None;
        for band in &bands {
            if band.below.is_some() && band.at_most.is_some() {
                return Err(BandError::ConflictingLimits {
                    label: band.label.clone(),
                });
            }
            if let Some(limit) = band.limit() {
                if !limit.is_finite() {
                    return Err(BandError::NonFiniteLimit {
                        label: band.label.clone(),
                    });
                }
                match previous {
                    Some(previous) if limit < previous => {
                        return Err(BandError::Unordered {
                            label: band.label.clone(),
                            limit,
                            previous,
                        });
                    }
                    _ => previous = Some(limit),
                }
            }
        }

        if let Some(band) = bounded.iter().find(|band| band.limit().is_none()) {
            return Err(BandError::UnboundedBeforeEnd {
                label: band.label.clone(),
            });
        }
        if last.limit().is_some() {
            return Err(BandError::MissingCatchAll {
                label: last.label.clone(),
            });
        }

        Ok(Self {
            bounded: bounded.to_vec(),
            rest: last.clone(),
        })
    }

    /// Thresholds used alongside the entry history:
    /// below 5 is good, up to 7 inclusive is moderate, above is high.
    pub fn history() -> Self {
        Self {
            bounded: vec![Band::below("good", 5.0), Band::at_most("moderate", 7.0)],
            rest: Band::rest("high"),
        }
    }

    /// Thresholds used by the single-calculation screen:
    /// below 6 is excellent, below 8 is good, the rest is high.
    pub fn single() -> Self {
        Self {
            bounded: vec![
                Band::below("excellent", 6.0).with_message("Excellent consumption!"),
                Band::below("good", 8.0).with_message("Good consumption"),
            ],
            rest: Band::rest("high").with_message("High consumption"),
        }
    }

    /// Returns the band a consumption value falls into.
    pub fn classify(&self, consumption: f64) -> &Band {
        self.bounded
            .iter()
            .find(|band| band.admits(consumption))
            .unwrap_or(&self.rest)
    }

    /// Iterates the bands in classification order.
    pub fn bands(&self) -> impl Iterator<Item = &Band> {
        self.bounded.iter().chain(std::iter::once(&self.rest))
    }
}

impl Default for BandTable {
    fn default() -> Self {
        Self::history()
    }
}

impl TryFrom<Vec<Band>> for BandTable {
    type Error = BandError;

    fn try_from(bands: Vec<Band>) -> Result<Self, Self::Error> {
        Self::new(bands)
    }
}

impl From<BandTable> for Vec<Band> {
    fn from(table: BandTable) -> Self {
        let mut bands = table.bounded;
        bands.push(table.rest);
        bands
    }
}
