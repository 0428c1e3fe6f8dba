//! Infrastructure layer with external service adapters.

/// Sound assets.
pub mod audio;
/// Application configuration.
pub mod config;
/// TCP transport.
pub mod network;
/// Translation catalogs.
pub mod translator;

pub use audio::{SoundBank, SoundPlayer};
pub use config::{AppConfig, CliArgs, LogLevel, StorageManager, TomlConfigurator};
pub use network::{PassiveProtocol, TcpConnector};
pub use translator::CatalogTranslator;
