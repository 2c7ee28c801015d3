//! Log output setup.
//!
//! The terminal belongs to the game while it runs, so logs only ever go to a file.

use std::{fs::File, sync::Mutex};

use color_eyre::eyre::{eyre, Result};

use crate::Config;

/// Installs a global subscriber writing to the configured log file.
///
/// Without a log file nothing is installed and every log event is discarded.
///
/// # Errors
///
/// This function may return errors if:
/// - The log file cannot be created
/// - A global subscriber was already installed
pub fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(config.log_level)
        .try_init()
        .map_err(|err| eyre!("failed to install the log subscriber: {err}"))
}
