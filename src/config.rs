// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::model::{StatusFilter, TypeFilter, ViewState};
use crate::storage::EventStorage;
use anyhow::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::fs;

fn default_upcoming_days() -> u32 {
    7
}

fn default_agenda_date_format() -> String {
    "%A, %B %-d, %Y".to_string()
}

fn default_time_format() -> String {
    "%H:%M".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub default_status_filter: StatusFilter,
    #[serde(default)]
    pub default_type_filter: TypeFilter,

    /// Days ahead counted as "upcoming" in the summary.
    #[serde(default = "default_upcoming_days")]
    pub upcoming_days: u32,

    /// chrono format used for agenda group headings.
    #[serde(default = "default_agenda_date_format")]
    pub agenda_date_format: String,
    #[serde(default = "default_time_format")]
    pub time_format: String,

    #[serde(default)]
    pub show_event_ids: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_status_filter: StatusFilter::All,
            default_type_filter: TypeFilter::All,
            // Match the serde defaults
            upcoming_days: 7,
            agenda_date_format: "%A, %B %-d, %Y".to_string(),
            time_format: "%H:%M".to_string(),
            show_event_ids: false,
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        config.validate().map_err(|e| {
            anyhow::anyhow!("Invalid config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Rejects format strings that cannot render the value they are applied
    /// to: agenda headings format a date, event lines a date-time.
    pub fn validate(&self) -> Result<()> {
        let sample_day = NaiveDate::from_ymd_opt(2026, 1, 1)
            .ok_or_else(|| anyhow::anyhow!("invalid sample date"))?;
        let sample_time = sample_day
            .and_hms_opt(9, 30, 0)
            .ok_or_else(|| anyhow::anyhow!("invalid sample time"))?;

        let mut buf = String::new();
        if write!(buf, "{}", sample_day.format(&self.agenda_date_format)).is_err() {
            anyhow::bail!(
                "agenda_date_format '{}' cannot format a calendar date",
                self.agenda_date_format
            );
        }
        buf.clear();
        if write!(buf, "{}", sample_time.format(&self.time_format)).is_err() {
            anyhow::bail!(
                "time_format '{}' cannot format a local date-time",
                self.time_format
            );
        }
        Ok(())
    }

    /// Loads the config, falling back to defaults only when the file is missing.
    /// Parse errors still propagate.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Whether an error from [`Config::load`] means the file did not exist,
    /// either via the explicit message or an IO `NotFound` in the chain.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        EventStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            EventStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }

    /// Initial view: the month containing `today`, with the configured filters.
    pub fn initial_view_state(&self, today: NaiveDate) -> ViewState {
        ViewState::new(today, self.default_status_filter, self.default_type_filter)
    }
}
