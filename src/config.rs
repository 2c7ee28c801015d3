//! Command-line configuration of the game.

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

/// Default pause between solving a level and showing its splash screen, in milliseconds.
pub(crate) const DEFAULT_PAUSE_MS: u64 = 800;

/// Default edge length of a board cell, in framebuffer pixels.
pub(crate) const DEFAULT_CELL_SIZE: u32 = 4;

/// Runtime configuration, parsed from the command line.
#[derive(Clone, Debug, Parser)]
#[command(version, about)]
pub struct Config {
    /// Index of the level to start from, wrapped around the number of levels.
    #[arg(short, long, default_value_t = 0)]
    pub level: usize,
    /// Directory to load extra `.sokmap` levels from, played after the built-in ones.
    #[arg(long, value_name = "DIR")]
    pub levels_dir: Option<PathBuf>,
    /// Skip the built-in levels and play only the ones loaded from `--levels-dir`.
    #[arg(long, requires = "levels_dir")]
    pub no_builtin: bool,
    /// Pause after solving a level before the splash screen appears, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_PAUSE_MS)]
    pub pause_ms: u64,
    /// Edge length of a board cell in framebuffer pixels.
    #[arg(
        long,
        value_name = "PX",
        default_value_t = DEFAULT_CELL_SIZE,
        value_parser = clap::value_parser!(u32).range(2..=16)
    )]
    pub cell_size: u32,
    /// File to write logs to. Nothing is logged without it.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
    /// Most verbose log level written to the log file.
    #[arg(long, value_name = "LEVEL", default_value_t = Level::INFO)]
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: 0,
            levels_dir: None,
            no_builtin: false,
            pause_ms: DEFAULT_PAUSE_MS,
            cell_size: DEFAULT_CELL_SIZE,
            log_file: None,
            log_level: Level::INFO,
        }
    }
}
