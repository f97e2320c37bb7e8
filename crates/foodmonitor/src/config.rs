//! Configuration management for foodmonitor.
//!
//! Loaded with figment from defaults, a TOML file, and environment variables.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::metrics::Thresholds;
use crate::model::food::DEFAULT_EXPIRING_SOON_DAYS;
use crate::model::zone::DEFAULT_WARNING_DELTA;
use crate::view::{is_valid_date_format, DEFAULT_DATE_FORMAT};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "foodmonitor";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "dashboard.db";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "FOODMONITOR_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (`FOODMONITOR_<SECTION>__<KEY>`)
/// 2. TOML config file at `~/.config/foodmonitor/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Alert thresholds.
    pub alerts: AlertsConfig,
    /// Display configuration.
    pub display: DisplayConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/foodmonitor/dashboard.db`
    pub database_path: Option<PathBuf>,
}

/// Thresholds for expiry and temperature alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    /// Items expiring within this many days count as expiring soon.
    pub expiring_soon_days: i64,
    /// Degrees from target before an in-range zone shows a warning.
    pub temperature_warning_delta: f64,
}

/// Output formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// `strftime` pattern for expiry dates.
    pub date_format: String,
    /// How many diet entries `diet list` prints.
    pub recent_diet_entries: usize,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            expiring_soon_days: DEFAULT_EXPIRING_SOON_DAYS,
            temperature_warning_delta: DEFAULT_WARNING_DELTA,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            recent_diet_entries: 10,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing, or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; defaults and the environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing, or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let delta = self.alerts.temperature_warning_delta;
        if !delta.is_finite() || delta < 0.0 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "temperature_warning_delta must be a non-negative number, got {delta}"
                ),
            });
        }

        if self.alerts.expiring_soon_days < 0 {
            return Err(Error::ConfigValidation {
                message: format!(
                    "expiring_soon_days cannot be negative, got {}",
                    self.alerts.expiring_soon_days
                ),
            });
        }

        if self.display.recent_diet_entries == 0 {
            return Err(Error::ConfigValidation {
                message: "recent_diet_entries must be greater than 0".to_string(),
            });
        }

        if self.display.date_format.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "date_format cannot be empty".to_string(),
            });
        }

        if !is_valid_date_format(&self.display.date_format) {
            return Err(Error::ConfigValidation {
                message: format!("invalid date_format: {}", self.display.date_format),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Alert thresholds for metric and status calculations.
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            expiring_soon_days: self.alerts.expiring_soon_days,
            warning_delta: self.alerts.temperature_warning_delta,
        }
    }
}
