//! Distance/volume input validation and consumption derivation.

use thiserror::Error;

/// Reasons a distance/volume pair is rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    /// The value could not be parsed as a number.
    #[error("{field} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },

    /// The value parsed but is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    /// The value is zero or negative.
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    /// The date could not be parsed as `YYYY-MM-DD`.
    #[error("invalid date {value:?}, expected YYYY-MM-DD")]
    InvalidDate { value: String },
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A validated distance/volume pair. Both values are finite and positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    kilometers: f64,
    liters: f64,
}

impl Measurement {
    /// Creates a measurement from already-parsed numbers.
    pub fn new(kilometers: f64, liters: f64) -> Result<Self, InputError> {
        Ok(Self {
            kilometers: check_positive("distance", kilometers)?,
            liters: check_positive("volume", liters)?,
        })
    }

    /// Parses raw form input. Surrounding whitespace is ignored.
    pub fn parse(distance: &str, volume: &str) -> Result<Self, InputError> {
        let kilometers = parse_number("distance", distance)?;
        let liters = parse_number("volume", volume)?;
        Self::new(kilometers, liters)
    }

    pub const fn kilometers(&self) -> f64 {
        self.kilometers
    }

    pub const fn liters(&self) -> f64 {
        self.liters
    }

    /// Liters per 100 km, rounded to two decimals.
    pub fn consumption(&self) -> f64 {
        round2(self.liters * 100.0 / self.kilometers)
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, InputError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| InputError::NotANumber {
            field,
            value: raw.to_string(),
        })
}

fn check_positive(field: &'static str, value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { field, value });
    }
    if value <= 0.0 {
        return Err(InputError::NotPositive { field, value });
    }
    Ok(value)
}
