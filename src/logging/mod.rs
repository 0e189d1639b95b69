// src/logging/mod.rs
use std::fs::{self, OpenOptions};
use std::io;

use crate::core::Config;

/// Installs the global logger. With `LOG_FILE` set, output is appended to that file
/// (parent directories are created); otherwise it goes to stderr.
///
/// Calling this twice is harmless: the second call keeps the first logger.
pub fn init(config: &Config) -> io::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(config.log_level)
        .format_timestamp_secs()
        .format_module_path(true)
        .format_target(false);

    // RUST_LOG still refines per-module levels on top of LOG_LEVEL
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    if let Some(path) = &config.log_file {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    if builder.try_init().is_err() {
        log::debug!("Logger already initialised");
    }
    Ok(())
}
