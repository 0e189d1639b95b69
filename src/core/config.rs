// src/core/config.rs
use std::env;
use std::fs;
use std::path::PathBuf;

use log::LevelFilter;
use thiserror::Error;

use crate::generators::{SubstitutionTable, TableError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid CHAR_MAP: {0}")]
    InvalidCharMap(#[source] TableError),

    #[error("Invalid character map file {path}: {source}")]
    InvalidCharMapFile {
        path: PathBuf,
        #[source]
        source: TableError,
    },

    #[error("Cannot read character map file {path}: {source}")]
    CharMapFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown CHAR_MAP_PRESET '{0}' (expected 'classic' or 'identity')")]
    UnknownPreset(String),
}

// Configuration for the generator, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    // Storage
    pub database_url: String,

    // Password Generation
    pub substitution_table: SubstitutionTable,
    pub default_password_length: usize,

    // Scoping
    pub default_owner: Option<String>,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:./data/passgen.db".to_string(),
            substitution_table: SubstitutionTable::classic(),
            default_password_length: 10,
            default_owner: None,
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unset keys keep their defaults.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        // Storage
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = non_blank("DATABASE_URL").or_else(|| non_blank("DB_PATH")) {
            config.database_url = url;
        }

        // Password Generation
        config.substitution_table = load_table(&lookup)?;

        if let Some(val) = lookup("DEFAULT_PASSWORD_LENGTH") {
            match val.parse::<usize>() {
                Ok(length) if length > 0 => config.default_password_length = length,
                _ => log::warn!("Ignoring invalid DEFAULT_PASSWORD_LENGTH '{}'", val),
            }
        }

        // Scoping
        if let Some(owner) = lookup("PASSGEN_OWNER") {
            if !owner.trim().is_empty() {
                config.default_owner = Some(owner);
            }
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                "off" => config.log_level = LevelFilter::Off,
                _ => log::warn!("Unknown LOG_LEVEL '{}', using {}", level, config.log_level),
            }
        }

        if let Some(file) = lookup("LOG_FILE") {
            config.log_file = Some(PathBuf::from(file));
        }

        Ok(config)
    }
}

// CHAR_MAP wins over CHAR_MAP_FILE, which wins over the preset.
fn load_table<F>(lookup: &F) -> Result<SubstitutionTable, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(json) = lookup("CHAR_MAP") {
        return SubstitutionTable::from_json(&json).map_err(ConfigError::InvalidCharMap);
    }

    if let Some(path) = lookup("CHAR_MAP_FILE") {
        let path = PathBuf::from(path);
        let json = fs::read_to_string(&path).map_err(|source| ConfigError::CharMapFileUnreadable {
            path: path.clone(),
            source,
        })?;
        return SubstitutionTable::from_json(&json)
            .map_err(|source| ConfigError::InvalidCharMapFile { path, source });
    }

    match lookup("CHAR_MAP_PRESET").as_deref().map(str::to_lowercase).as_deref() {
        None | Some("classic") => Ok(SubstitutionTable::classic()),
        Some("identity") | Some("none") => Ok(SubstitutionTable::identity()),
        Some(other) => Err(ConfigError::UnknownPreset(other.to_string())),
    }
}
