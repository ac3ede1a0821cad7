//! List command for showing the recorded history.

use std::io::Write;

use anyhow::Result;
use fuel_core::{BandTable, ConsumptionEntry};
use fuel_store::{HistoryStore, Storage};
use serde::Serialize;

#[derive(Serialize)]
struct ListedEntry<'a> {
    #[serde(flatten)]
    entry: &'a ConsumptionEntry,
    band: &'a str,
}

#[derive(Serialize)]
struct ListOutput<'a> {
    average: f64,
    entries: Vec<ListedEntry<'a>>,
}

pub fn run<W: Write, S: Storage>(
    writer: &mut W,
    store: &HistoryStore<S>,
    json: bool,
    bands: &BandTable,
) -> Result<()> {
    let entries = store.entries();

    if json {
        let output = ListOutput {
            average: store.average(),
            entries: entries
                .iter()
                .map(|entry| ListedEntry {
                    entry,
                    band: &bands.classify(entry.consumption()).label,
                })
                .collect(),
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
        return Ok(());
    }

    if entries.is_empty() {
        writeln!(
            writer,
            "No entries recorded. Run 'fuel add <KM> <LITERS>' to add one."
        )?;
        return Ok(());
    }

    writeln!(
        writer,
        "{:<36} {:<10} {:>8} {:>8} {:>8} BAND",
        "ID", "DATE", "KM", "LITERS", "L/100KM"
    )?;
    for entry in entries {
        writeln!(
            writer,
            "{:<36} {:<10} {:>8} {:>8} {:>8} {}",
            entry.id().as_str(),
            entry.date().to_string(),
            entry.kilometers(),
            entry.liters(),
            entry.consumption(),
            bands.classify(entry.consumption()).label
        )?;
    }
    writeln!(writer, "Average: {} L/100km", store.average())?;

    Ok(())
}
