//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;

const APP_NAME: &str = "cah-client";
const APP_QUALIFIER: &str = "org";
const APP_ORGANIZATION: &str = "cah-online";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Startup parameters, from `config.toml` and the command line.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Requested display width in cells; clamped to the terminal.
    #[serde(default = "default_width")]
    pub width: u16,

    /// Requested display height in cells; clamped to the terminal.
    #[serde(default = "default_height")]
    pub height: u16,

    /// Screen-reader friendly views.
    #[serde(default)]
    pub accessibility: bool,

    /// Ticks per second.
    #[serde(default = "default_tick_rate")]
    pub tick_rate_hz: u32,

    /// Directory holding `sound/` and `translations/`.
    #[serde(default)]
    pub assets_dir: Option<PathBuf>,
}

const fn default_width() -> u16 {
    1280
}

const fn default_height() -> u16 {
    720
}

const fn default_tick_rate() -> u32 {
    30
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(width) = args.width {
            self.width = width;
        }
        if let Some(height) = args.height {
            self.height = height;
        }
        if args.accessibility {
            self.accessibility = true;
        }
        if let Some(tick_rate) = args.tick_rate {
            self.tick_rate_hz = tick_rate;
        }
        if let Some(assets_dir) = args.assets_dir {
            self.assets_dir = Some(assets_dir);
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("cah-client.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns the assets directory, `./assets` unless configured.
    #[must_use]
    pub fn effective_assets_dir(&self) -> PathBuf {
        self.assets_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("assets"))
    }

    /// Returns the tick rate, at least one tick per second.
    #[must_use]
    pub fn effective_tick_rate(&self) -> u32 {
        self.tick_rate_hz.max(1)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            width: default_width(),
            height: default_height(),
            accessibility: false,
            tick_rate_hz: default_tick_rate(),
            assets_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            log_level = "debug"
            width = 100
            accessibility = true
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.width, 100);
        assert_eq!(config.height, 720);
        assert!(config.accessibility);
        assert_eq!(config.tick_rate_hz, 30);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!((config.width, config.height), (1280, 720));
        assert_eq!(config.tick_rate_hz, 30);
        assert!(!config.accessibility);
        assert_eq!(config.effective_assets_dir(), PathBuf::from("assets"));
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let mut config: AppConfig = toml::from_str("width = 100\ntick_rate_hz = 60").unwrap();
        let args = CliArgs::parse_from(["cah-client", "--width", "80", "--accessibility"]);

        config.merge_with_args(args);

        assert_eq!(config.width, 80);
        assert_eq!(config.tick_rate_hz, 60);
        assert!(config.accessibility);
    }

    #[test]
    fn test_zero_tick_rate_is_clamped() {
        let config = AppConfig {
            tick_rate_hz: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.effective_tick_rate(), 1);
    }
}
