use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use fuel_store::{FileStorage, HistoryStore};
use tracing_subscriber::EnvFilter;

use fuel_cli::commands::{add, calc, delete, list, stats};
use fuel_cli::{Cli, Commands, Config};

/// Load config and the stored history.
///
/// Returns the store along with the config and the file backing the history.
fn open_store(
    config_path: Option<&Path>,
) -> Result<(HistoryStore<FileStorage>, Config, PathBuf)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let storage = FileStorage::open(&config.storage_dir).with_context(|| {
        format!("failed to open storage at {}", config.storage_dir.display())
    })?;
    let location = storage
        .slot_path(&config.storage_key)
        .context("invalid storage_key")?;
    let store = HistoryStore::load(storage, config.store_options())
        .with_context(|| format!("failed to load history from {}", location.display()))?;
    Ok((store, config, location))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Calc { distance, volume }) => {
            let config =
                Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
            calc::run(&mut stdout, distance, volume, &config.calc_bands)?;
        }
        Some(Commands::Add(args)) => {
            let (mut store, config, _location) = open_store(cli.config.as_deref())?;
            let today = chrono::Local::now().date_naive();
            add::run(&mut stdout, &mut store, args, today, &config.history_bands)?;
        }
        Some(Commands::List { json }) => {
            let (store, config, _location) = open_store(cli.config.as_deref())?;
            list::run(&mut stdout, &store, *json, &config.history_bands)?;
        }
        Some(Commands::Delete { id }) => {
            let (mut store, _config, _location) = open_store(cli.config.as_deref())?;
            delete::run(&mut stdout, &mut store, id)?;
        }
        Some(Commands::Stats { json }) => {
            let (store, config, location) = open_store(cli.config.as_deref())?;
            stats::run(&mut stdout, &store, &location, *json, &config.history_bands)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
