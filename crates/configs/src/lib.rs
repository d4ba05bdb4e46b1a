//! # configs
//!
//! Layered settings: `.env` (via [`load_dotenv`]), then an optional
//! `config/showcase.*` file, then `SHOWCASE__*` environment variables
//! (e.g. `SHOWCASE__BACKEND__URL`).

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use domains::{Scope, UserId};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Which backend the binary talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Process-local catalog with demo data.
    #[default]
    Memory,
    /// The hosted data API.
    Rest,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub mode: BackendMode,
    pub url: Option<String>,
    pub api_key: Option<SecretString>,
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            mode: BackendMode::Memory,
            url: None,
            api_key: None,
            timeout_secs: 10,
        }
    }
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// `EnvFilter` directive; `RUST_LOG` still wins when set.
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListingSettings {
    pub scope: Scope,
    pub viewer_id: Option<UserId>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: BackendSettings,
    pub log: LogSettings,
    pub listing: ListingSettings,
}

/// Reads `./.env` into the process environment. A missing file is fine.
pub fn load_dotenv() -> std::result::Result<(), dotenvy::Error> {
    tolerate_missing(dotenvy::dotenv().map(drop))
}

/// [`load_dotenv`] for an explicit path.
pub fn load_dotenv_from(path: impl AsRef<Path>) -> std::result::Result<(), dotenvy::Error> {
    tolerate_missing(dotenvy::from_path(path))
}

fn tolerate_missing(
    result: std::result::Result<(), dotenvy::Error>,
) -> std::result::Result<(), dotenvy::Error> {
    match result {
        Err(err) if !err.not_found() => Err(err),
        _ => Ok(()),
    }
}

impl Settings {
    /// Loads the config file and `SHOWCASE__*` variables and validates the
    /// result. Call [`load_dotenv`] first to pick up a `.env` file.
    pub fn load() -> Result<Self> {
        let settings: Settings = Config::builder()
            .add_source(File::with_name("config/showcase").required(false))
            .add_source(
                Environment::with_prefix("SHOWCASE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parses a TOML document on its own, without files or environment.
    pub fn from_toml(source: &str) -> Result<Self> {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "backend.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.backend.mode == BackendMode::Rest {
            if self.backend.url.as_deref().map_or(true, str::is_empty) {
                return Err(ConfigError::Invalid(
                    "backend.url is required when backend.mode = \"rest\"".into(),
                ));
            }
            if self.backend.api_key.is_none() {
                return Err(ConfigError::Invalid(
                    "backend.api_key is required when backend.mode = \"rest\"".into(),
                ));
            }
        }
        Ok(())
    }
}
