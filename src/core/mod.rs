// src/core/mod.rs
pub mod config;
pub mod service;

pub use config::{Config, ConfigError};
pub use service::{PassGen, ServiceError};
