//! # Configuration State
//!
//! Stores the shop configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SALON_*`, nested keys joined with `__`)
//! 2. Config file (`salon.toml` in the working directory, or `--config <path>`)
//! 3. Defaults (this file and `salon-core`)
//!
//! ```toml
//! shop_name = "Peluquería Centro"
//!
//! [schedule]
//! slot_minutes = 30
//!
//! [schedule.hours.saturday]
//! open = "09:00"
//! close = "13:00"
//! ```
//!
//! `SALON_SCHEDULE__SLOT_MINUTES=45` overrides the step for one run.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use salon_core::{Catalog, Money, Schedule};

/// Environment prefix for every configuration key.
const ENV_PREFIX: &str = "SALON";

/// Config file looked up in the working directory when `--config` is absent.
const DEFAULT_CONFIG_NAME: &str = "salon";

/// Errors raised while loading or checking configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or did not deserialize.
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// The values loaded are inconsistent (hours, slot step, catalog).
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// No database path was given and no platform data directory exists.
    #[error("Could not determine app data directory")]
    NoDataDir,
}

/// Application configuration.
///
/// Every field has a default, so an empty file (or none at all) gives the
/// stock salon: three stylists, six services, weekday hours 10:00–19:00.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Shop name (shown in summaries)
    pub shop_name: String,

    /// Currency symbol, written after the amount
    pub currency_symbol: String,

    /// Database file; `None` falls back to `SALON_DB_PATH`, then the
    /// platform data directory
    pub database_path: Option<PathBuf>,

    /// Business hours and slot step
    pub schedule: Schedule,

    /// Services and providers
    pub catalog: Catalog,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            shop_name: "Salon".to_string(),
            currency_symbol: "€".to_string(),
            database_path: None,
            schedule: Schedule::default(),
            catalog: Catalog::default(),
        }
    }
}

impl ConfigState {
    /// Loads configuration from the file and the environment.
    ///
    /// An explicit `path` must exist; the default `salon.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let builder = Config::builder().add_source(file).add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        Self::from_builder(builder)
    }

    /// Loads configuration from TOML text only.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::from_builder(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: ConfigState = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the schedule and catalog produce a usable slot grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.schedule
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.catalog
            .check_grid(self.schedule.slot_minutes)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(())
    }

    /// Formats a cent amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1550), "15.50€");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        format!("{}{}", Money::from_cents(cents), self.currency_symbol)
    }
}
