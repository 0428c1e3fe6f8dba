//! Config directory access: `config.toml` and the `client.toml` settings file.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use super::app_config::AppConfig;
use crate::domain::errors::PersistenceError;

const CONFIG_FILE_NAME: &str = "config.toml";
const SETTINGS_FILE_NAME: &str = "client.toml";

/// Persisted client settings.
pub type Settings = BTreeMap<String, String>;

/// Configuration storage errors.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ConfigError {
    #[error("no configuration directory for this platform")]
    NoConfigDir,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("cannot encode settings: {0}")]
    Encode(#[from] toml::ser::Error),
}

impl From<ConfigError> for PersistenceError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::NoConfigDir => Self::Unavailable,
            ConfigError::Encode(e) => Self::encode(e.to_string()),
            ConfigError::Io(e) => Self::write(e.to_string()),
        }
    }
}

/// Files in the client's config directory.
///
/// Missing or malformed files read as defaults; writes replace the file
/// atomically.
#[derive(Debug)]
pub struct StorageManager {
    dir: PathBuf,
}

impl StorageManager {
    /// Uses the platform config directory.
    ///
    /// # Errors
    /// Returns `NoConfigDir` if the platform has none.
    pub fn new() -> Result<Self, ConfigError> {
        AppConfig::default_config_dir()
            .map(Self::with_dir)
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Uses `dir` instead of the platform directory.
    #[must_use]
    pub const fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Loads `config.toml`, or `path_override` when given.
    ///
    /// # Errors
    /// Returns error if an existing file cannot be read.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = path_override.map_or_else(|| self.dir.join(CONFIG_FILE_NAME), Path::to_path_buf);
        read_or_default(&path)
    }

    /// Loads `client.toml`.
    ///
    /// # Errors
    /// Returns error if an existing file cannot be read.
    pub fn load_settings(&self) -> Result<Settings, ConfigError> {
        read_or_default(&self.dir.join(SETTINGS_FILE_NAME))
    }

    /// Replaces `client.toml` with `settings`.
    ///
    /// # Errors
    /// Returns error if the directory or file cannot be written.
    pub fn save_settings(&self, settings: &Settings) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.dir)?;
        write_atomic(&self.dir.join(SETTINGS_FILE_NAME), settings)
    }
}

fn read_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No file, using defaults");
            return Ok(T::default());
        }
        Err(e) => return Err(e.into()),
    };

    Ok(toml::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Malformed file, using defaults");
        T::default()
    }))
}

fn write_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(value)?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(content.as_bytes())?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}
