//! Application settings loaded from `expense_tracker.toml`.
//!
//! Every field has a default, so a missing file or a partial file is fine. Secrets do not
//! belong here; the database URL can be overridden by `DATABASE_URL` (see
//! [`crate::config::database::get_database_url`]).

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default location of the settings file, relative to the working directory.
pub const DEFAULT_SETTINGS_PATH: &str = "expense_tracker.toml";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

/// Settings structure representing the whole `expense_tracker.toml` file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Database URL used when `DATABASE_URL` is not set
    pub database_url: Option<String>,
    /// Upper bound on pooled store connections
    pub max_connections: u32,
    /// Shortest password accepted at registration
    pub min_password_length: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

/// Parses settings from TOML text.
///
/// # Errors
/// Returns `Error::Config` if the TOML syntax is invalid or a field has the wrong type.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse settings: {e}"),
    })?;

    if settings.max_connections == 0 {
        return Err(Error::Config {
            message: "max_connections must be at least 1".to_string(),
        });
    }

    Ok(settings)
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns `Error::Config` if the file cannot be read or does not parse.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading settings from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read settings file {}: {e}", path_ref.display()),
    })?;

    parse_settings(&contents)
}

/// Loads settings from [`DEFAULT_SETTINGS_PATH`], falling back to defaults when the file
/// does not exist.
///
/// # Errors
/// Returns `Error::Config` if the file exists but cannot be read or parsed.
pub fn load_default_settings() -> Result<Settings> {
    if Path::new(DEFAULT_SETTINGS_PATH).exists() {
        load_settings(DEFAULT_SETTINGS_PATH)
    } else {
        tracing::debug!("No {DEFAULT_SETTINGS_PATH} found, using default settings");
        Ok(Settings::default())
    }
}
