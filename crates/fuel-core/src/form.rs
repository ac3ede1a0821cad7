//! Entry form state and the two ways of submitting it.
//!
//! [`EntryForm::calculate`] is the single-calculation flow: it reads the
//! form and returns a result without touching anything. [`EntryForm::submit`]
//! is the history flow: it emits a new [`ConsumptionEntry`] and resets the
//! form. Both reject invalid input silently by returning `None`; callers that
//! want the reason use [`EntryForm::validate`].

use chrono::NaiveDate;

use crate::entry::ConsumptionEntry;
use crate::measurement::{InputError, Measurement};

/// Raw entry form fields as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryForm {
    pub distance: String,
    pub volume: String,
    pub date: String,
}

/// Result of a single calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub measurement: Measurement,
    /// Liters per 100 km, rounded to two decimals.
    pub consumption: f64,
}

impl EntryForm {
    /// An empty form dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            distance: String::new(),
            volume: String::new(),
            date: format_date(today),
        }
    }

    /// Checks every field and returns the parsed values.
    pub fn validate(&self) -> Result<(Measurement, NaiveDate), InputError> {
        let measurement = Measurement::parse(&self.distance, &self.volume)?;
        let date = self
            .date
            .trim()
            .parse::<NaiveDate>()
            .map_err(|_| InputError::InvalidDate {
                value: self.date.clone(),
            })?;
        Ok((measurement, date))
    }

    /// Computes consumption from distance and volume. The date is not used.
    pub fn calculate(&self) -> Option<Reading> {
        match Measurement::parse(&self.distance, &self.volume) {
            Ok(measurement) => Some(Reading {
                measurement,
                consumption: measurement.consumption(),
            }),
            Err(err) => {
                tracing::debug!(%err, "calculation skipped");
                None
            }
        }
    }

    /// Builds a new entry from the form.
    ///
    /// On success the distance and volume are cleared and the date is reset to
    /// `today`. On invalid input the form is left as it was.
    pub fn submit(&mut self, today: NaiveDate) -> Option<ConsumptionEntry> {
        let (measurement, date) = match self.validate() {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::debug!(%err, "entry rejected");
                return None;
            }
        };

        let entry = ConsumptionEntry::record(date, measurement);
        *self = Self::new(today);
        Some(entry)
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn filled(distance: &str, volume: &str, on: &str) -> EntryForm {
        EntryForm {
            distance: distance.to_string(),
            volume: volume.to_string(),
            date: on.to_string(),
        }
    }

    #[test]
    fn new_form_is_dated_today() {
        let form = EntryForm::new(date("2024-05-17"));
        assert_eq!(form.date, "2024-05-17");
        assert!(form.distance.is_empty());
        assert!(form.volume.is_empty());
    }

    #[test]
    fn calculate_returns_rounded_consumption() {
        let form = filled("500", "35", "2024-01-01");
        let reading = form.calculate().unwrap();
        assert!((reading.consumption - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn calculate_ignores_date() {
        let form = filled("400", "30", "not a date");
        assert!(form.calculate().is_some());
    }

    #[test]
    fn calculate_rejects_zero_distance() {
        let form = filled("0", "10", "2024-01-01");
        assert!(form.calculate().is_none());
    }

    #[test]
    fn submit_emits_entry_and_resets_form() {
        let mut form = filled("500", "35", "2024-03-01");
        let entry = form.submit(date("2024-06-30")).unwrap();

        assert_eq!(entry.date(), date("2024-03-01"));
        assert!((entry.consumption() - 7.0).abs() < f64::EPSILON);
        assert_eq!(form, EntryForm::new(date("2024-06-30")));
    }

    #[test]
    fn submit_with_invalid_input_leaves_form_untouched() {
        let mut form = filled("0", "10", "2024-03-01");
        let before = form.clone();

        assert!(form.submit(date("2024-06-30")).is_none());
        assert_eq!(form, before);
    }

    #[test]
    fn submit_with_non_numeric_input_is_silent() {
        let mut form = filled("abc", "10", "2024-03-01");
        assert!(form.submit(date("2024-06-30")).is_none());
    }

    #[test]
    fn validate_reports_bad_date() {
        let form = filled("100", "5", "2024-13-01");
        assert!(matches!(
            form.validate(),
            Err(InputError::InvalidDate { .. })
        ));
    }

    #[test]
    fn validate_reports_bad_volume() {
        let form = filled("100", "-1", "2024-01-01");
        assert!(matches!(
            form.validate(),
            Err(InputError::NotPositive { field: "volume", .. })
        ));
    }
}
