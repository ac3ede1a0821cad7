//! Stats command for summarizing the history.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use fuel_core::BandTable;
use fuel_store::{HistoryStore, Storage};
use serde::Serialize;

#[derive(Serialize)]
struct Stats<'a> {
    storage: &'a Path,
    entries: usize,
    average: f64,
    band: Option<&'a str>,
}

pub fn run<W: Write, S: Storage>(
    writer: &mut W,
    store: &HistoryStore<S>,
    location: &Path,
    json: bool,
    bands: &BandTable,
) -> Result<()> {
    let history = store.history();
    let stats = Stats {
        storage: location,
        entries: history.len(),
        average: history.average(),
        band: (!history.is_empty()).then(|| bands.classify(history.average()).label.as_str()),
    };

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&stats)?)?;
        return Ok(());
    }

    writeln!(writer, "Fuel consumption history")?;
    writeln!(writer, "Storage: {}", stats.storage.display())?;
    writeln!(writer, "Entries: {}", stats.entries)?;
    match stats.band {
        Some(band) => writeln!(writer, "Average: {} L/100km ({band})", stats.average)?,
        None => writeln!(writer, "Average: {} L/100km", stats.average)?,
    }

    Ok(())
}
