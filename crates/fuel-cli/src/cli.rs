//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Fuel consumption tracker.
///
/// Computes liters per 100 km from a distance and a fuel volume, and keeps a
/// dated history of fill-ups with a running average.
#[derive(Debug, Parser)]
#[command(name = "fuel", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute consumption once without recording it.
    Calc {
        /// Distance traveled, in km.
        #[arg(allow_hyphen_values = true)]
        distance: String,

        /// Fuel consumed, in liters.
        #[arg(allow_hyphen_values = true)]
        volume: String,
    },

    /// Record a fill-up in the history.
    Add(AddArgs),

    /// List recorded entries, newest first.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Delete an entry by ID.
    Delete {
        /// The entry ID, as shown by `fuel list`.
        id: String,
    },

    /// Show the storage location, entry count and average.
    Stats {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Arguments for `fuel add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Distance traveled, in km.
    #[arg(allow_hyphen_values = true)]
    pub distance: String,

    /// Fuel consumed, in liters.
    #[arg(allow_hyphen_values = true)]
    pub volume: String,

    /// Date of the fill-up (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}
