//! Application configuration.

pub mod app_config;
pub mod args;
pub mod configurator;
pub mod storage;

pub use app_config::{AppConfig, LogLevel};
pub use args::CliArgs;
pub use configurator::{DEFAULT_LANGUAGE, TomlConfigurator};
pub use storage::{ConfigError, Settings, StorageManager};
