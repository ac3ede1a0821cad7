//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use fuel_core::BandTable;
use fuel_store::{DEFAULT_KEY, StoreOptions};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the storage slot files.
    pub storage_dir: PathBuf,
    /// Name of the slot the history is stored in.
    pub storage_key: String,
    /// Clear the storage slot when the history becomes empty instead of
    /// leaving the old content in place.
    pub persist_empty: bool,
    /// Bands shown next to recorded entries and the average.
    pub history_bands: BandTable,
    /// Bands shown by `fuel calc`.
    pub calc_bands: BandTable,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = |table: &BandTable| {
            table
                .bands()
                .map(|band| band.label.clone())
                .collect::<Vec<_>>()
        };
        f.debug_struct("Config")
            .field("storage_dir", &self.storage_dir)
            .field("storage_key", &self.storage_key)
            .field("persist_empty", &self.persist_empty)
            .field("history_bands", &labels(&self.history_bands))
            .field("calc_bands", &labels(&self.calc_bands))
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: dirs_data_path().unwrap_or_else(|| PathBuf::from(".")),
            storage_key: DEFAULT_KEY.to_string(),
            persist_empty: true,
            history_bands: BandTable::history(),
            calc_bands: BandTable::single(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (FUEL_*)
        figment = figment.merge(Env::prefixed("FUEL_"));

        figment.extract()
    }

    /// Storage options derived from this configuration.
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            key: self.storage_key.clone(),
            persist_empty: self.persist_empty,
        }
    }
}

/// Returns the platform-specific config directory for fuel.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("fuel"))
}

/// Returns the platform-specific data directory for fuel.
///
/// On Linux: `~/.local/share/fuel`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("fuel"))
}
