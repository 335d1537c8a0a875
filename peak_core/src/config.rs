//! Configuration file support for Peak.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/peak/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub plates: PlateConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct DataConfig {
    /// Falls back to the platform data directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Loadable weight increments
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlateConfig {
    /// Smallest jump the lifter can load, used for log prefill and export
    #[serde(default = "default_increment_kg")]
    pub increment_kg: f64,
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self {
            increment_kg: default_increment_kg(),
        }
    }
}

/// CSV export configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    /// File name inside the data directory when no path is given
    #[serde(default = "default_export_file_name")]
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: default_export_file_name(),
        }
    }
}

// Default value functions
fn default_increment_kg() -> f64 {
    0.5
}

fn default_export_file_name() -> String {
    "program.csv".into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject values the rest of the system can't work with
    pub fn validate(&self) -> Result<()> {
        let inc = self.plates.increment_kg;
        if !inc.is_finite() || inc <= 0.0 {
            return Err(Error::Config(format!(
                "plates.increment_kg must be positive, got {}",
                inc
            )));
        }
        if self.export.file_name.trim().is_empty() {
            return Err(Error::Config("export.file_name must not be empty".into()));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|base| base.join("peak").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine the config directory".into()))
    }

    /// Directory holding the profile, training log and exports
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_local_dir()
            .map(|base| base.join("peak"))
            .ok_or_else(|| {
                Error::Config("Could not determine the data directory; set data.data_dir".into())
            })
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Where the profile lives
    pub fn profile_path(data_dir: &Path) -> PathBuf {
        data_dir.join("profile.json")
    }

    /// Where training log entries are appended
    pub fn log_path(data_dir: &Path) -> PathBuf {
        data_dir.join("logs").join("training.wal")
    }
}
