//! Run configuration.
//!
//! Settings come from a TOML file (searched in standard locations) with
//! environment variables layered on top:
//! 1. Explicit path (CLI) or `WEATHER_ENRICH_CONFIG`
//! 2. `./weather-enrich.toml`
//! 3. `<config dir>/weather-enrich/config.toml` (e.g. `~/.config` on Linux)
//! 4. Built-in defaults
//!
//! `WEATHER_API_KEY` and `WEATHER_UNITS` override the file.

use crate::batch::{InvalidDatePolicy, DEFAULT_CONCURRENCY};
use crate::dates::resolve::DEFAULT_LOOKBACK_DAYS;
use crate::types::units::{UnknownUnitsError, Units};
use crate::weather_data::query::{Credentials, DEFAULT_BASE_URL};
use log::debug;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV_VAR: &str = "WEATHER_ENRICH_CONFIG";
pub const API_KEY_ENV_VAR: &str = "WEATHER_API_KEY";
pub const UNITS_ENV_VAR: &str = "WEATHER_UNITS";

const APP_DIR_NAME: &str = "weather-enrich";
const LOCAL_CONFIG_FILE: &str = "weather-enrich.toml";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}'")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("No API key configured; set `api_key` in the config file or WEATHER_API_KEY")]
    MissingApiKey,

    #[error(transparent)]
    InvalidUnits(#[from] UnknownUnitsError),
}

/// Where the settings were loaded from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Given on the command line or through `WEATHER_ENRICH_CONFIG`.
    Explicit(PathBuf),
    CurrentDir(PathBuf),
    UserConfig(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(p)
            | ConfigSource::CurrentDir(p)
            | ConfigSource::UserConfig(p) => Some(p.as_path()),
            ConfigSource::Defaults => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(p) => write!(f, "{}", p.display()),
            None => write!(f, "(defaults)"),
        }
    }
}

/// Everything a run needs besides the records themselves.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub api_key: Option<String>,
    pub units: Units,
    pub concurrency: usize,
    pub lookback_days: i64,
    pub base_url: String,
    /// Per-request timeout; unset means the transport default.
    pub request_timeout_secs: Option<u64>,
    pub invalid_dates: InvalidDatePolicy,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            units: Units::default(),
            concurrency: DEFAULT_CONCURRENCY,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            invalid_dates: InvalidDatePolicy::default(),
            input: PathBuf::from("zika.csv"),
            output: PathBuf::from("zika_weather.csv"),
        }
    }
}

impl Settings {
    /// Finds, reads and env-overrides the settings.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource), ConfigError> {
        let source = find_config_file(explicit);
        debug!("Loading settings from {}", source);
        let mut settings = match source.path() {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env(|key| env::var(key).ok())?;
        Ok((settings, source))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Self::from_toml(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Applies `WEATHER_API_KEY` and `WEATHER_UNITS` as returned by `lookup`.
    pub fn apply_env<L>(&mut self, lookup: L) -> Result<(), ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV_VAR).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(units) = lookup(UNITS_ENV_VAR) {
            self.units = units.parse()?;
        }
        Ok(())
    }

    /// The API key and units; the key must be present and non-blank.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(Credentials::new(key, self.units)),
            _ => Err(ConfigError::MissingApiKey),
        }
    }
}

/// Picks the first existing config file in search order.
pub fn find_config_file(explicit: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Ok(path) = env::var(CONFIG_ENV_VAR) {
        let p = PathBuf::from(path);
        if p.exists() {
            return ConfigSource::Explicit(p);
        }
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return ConfigSource::CurrentDir(local);
    }

    if let Some(user) = dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE)) {
        if user.exists() {
            return ConfigSource::UserConfig(user);
        }
    }

    ConfigSource::Defaults
}
