//! Configuration resolved from environment variables and a user settings file
//!
//! ## Resolution
//!
//! 1. `SPENDLENS_DATA_FILE` / `SPENDLENS_USER_SETTINGS` when set
//! 2. `user_settings.json` in the working directory, then
//!    `~/.local/share/spendlens/user_settings.json` (platform data dir)
//! 3. Built-in defaults
//!
//! The CLI loads `.env` before calling [`Config::from_env`] and lets flags
//! override the result.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

pub const DATA_FILE_ENV: &str = "SPENDLENS_DATA_FILE";
pub const USER_SETTINGS_ENV: &str = "SPENDLENS_USER_SETTINGS";
pub const API_KEY_ENV: &str = "API_KEY";
pub const STOCK_API_KEY_ENV: &str = "STOCK_API_KEY";
pub const CURRENCY_API_KEY_ENV: &str = "CURRENCY_API_KEY";

pub const DEFAULT_DATA_FILE: &str = "data/operations.xlsx";
pub const DEFAULT_USER_SETTINGS: &str = "user_settings.json";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Operations export to analyze
    pub data_file: PathBuf,
    /// JSON or TOML file with currency and stock lists
    pub user_settings: PathBuf,
    pub api_key: Option<String>,
    /// Key for a real stock price provider (unused by the stub)
    pub stock_api_key: Option<String>,
    /// Key for a real currency rate provider (unused by the stub)
    pub currency_api_key: Option<String>,
}

impl Config {
    /// Resolve configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_file = non_empty(DATA_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));
        let user_settings = non_empty(USER_SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(resolve_user_settings_path);

        Self {
            data_file,
            user_settings,
            api_key: non_empty(API_KEY_ENV),
            stock_api_key: non_empty(STOCK_API_KEY_ENV),
            currency_api_key: non_empty(CURRENCY_API_KEY_ENV),
        }
    }

    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    pub fn with_user_settings(mut self, path: impl Into<PathBuf>) -> Self {
        self.user_settings = path.into();
        self
    }

    /// Load the user settings file, falling back to defaults if it is absent
    pub fn load_user_settings(&self) -> Result<UserSettings> {
        UserSettings::load(&self.user_settings)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Platform location of the user settings file
pub fn default_user_settings_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("spendlens").join(DEFAULT_USER_SETTINGS))
}

fn resolve_user_settings_path() -> PathBuf {
    let local = PathBuf::from(DEFAULT_USER_SETTINGS);
    if local.exists() {
        return local;
    }
    match default_user_settings_path() {
        Some(path) if path.exists() => path,
        _ => local,
    }
}

/// Symbols shown on the home page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub user_currencies: Vec<String>,
    pub user_stocks: Vec<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            user_currencies: vec!["USD".to_string(), "EUR".to_string()],
            user_stocks: vec!["AAPL".to_string(), "GOOG".to_string()],
        }
    }
}

impl UserSettings {
    /// Read settings from JSON, or TOML when the extension is `.toml`
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(
                "No user settings at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
        let settings = if is_toml {
            toml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        Ok(settings)
    }
}
