//! Add command for recording a fill-up.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use fuel_core::{BandTable, ConsumptionEntry, Measurement};
use fuel_store::{HistoryStore, Storage};

use crate::AddArgs;

/// Runs the add command.
///
/// Invalid distance or volume records nothing and prints nothing.
pub fn run<W: Write, S: Storage>(
    writer: &mut W,
    store: &mut HistoryStore<S>,
    args: &AddArgs,
    today: NaiveDate,
    bands: &BandTable,
) -> Result<()> {
    let measurement = match Measurement::parse(&args.distance, &args.volume) {
        Ok(measurement) => measurement,
        Err(err) => {
            tracing::debug!(%err, "rejected entry");
            return Ok(());
        }
    };
    let entry = ConsumptionEntry::record(args.date.unwrap_or(today), measurement);

    store
        .insert(entry.clone())
        .context("failed to save entry")?;

    writeln!(writer, "Recorded {}", entry.id())?;
    writeln!(
        writer,
        "{}: {} km, {} L -> {} L/100km ({})",
        entry.date(),
        entry.kilometers(),
        entry.liters(),
        entry.consumption(),
        bands.classify(entry.consumption()).label
    )?;
    writeln!(
        writer,
        "Average: {} L/100km over {} entries",
        store.average(),
        store.entries().len()
    )?;
    Ok(())
}
