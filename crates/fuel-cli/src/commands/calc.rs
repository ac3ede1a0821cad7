//! Calc command for a one-off consumption calculation.

use std::io::Write;

use anyhow::Result;
use fuel_core::{BandTable, EntryForm};

/// Runs the calc command. Invalid input produces no output.
pub fn run<W: Write>(
    writer: &mut W,
    distance: &str,
    volume: &str,
    bands: &BandTable,
) -> Result<()> {
    let form = EntryForm {
        distance: distance.to_string(),
        volume: volume.to_string(),
        date: String::new(),
    };

    let Some(reading) = form.calculate() else {
        return Ok(());
    };

    writeln!(writer, "{} L/100km", reading.consumption)?;
    writeln!(writer, "{}", bands.classify(reading.consumption).text())?;
    Ok(())
}
