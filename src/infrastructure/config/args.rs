//! Command line arguments.

use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "cah-client",
    version,
    about = "Terminal client for Cards Against Humanity Online",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Display width in cells.
    #[arg(long)]
    pub width: Option<u16>,

    /// Display height in cells.
    #[arg(long)]
    pub height: Option<u16>,

    /// Enable screen-reader friendly views.
    #[arg(long)]
    pub accessibility: bool,

    /// Ticks per second.
    #[arg(long)]
    pub tick_rate: Option<u32>,

    /// Directory holding sounds and translations.
    #[arg(long, value_name = "PATH", env = "CAH_ASSETS_DIR")]
    pub assets_dir: Option<PathBuf>,
}
