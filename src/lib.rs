//! Password derivation and generation with a persisted history.
//!
//! A base string is turned into a password through a [`generators::SubstitutionTable`];
//! without a base, a random alphanumeric password of the requested length is drawn from
//! the OS CSPRNG. [`core::PassGen`] records each result in a [`db::Database`].

pub mod cli;
pub mod core;
pub mod db;
pub mod generators;
pub mod logging;
pub mod models;
pub mod utils;

pub use crate::core::{Config, PassGen};
pub use crate::db::{Database, PasswordStore};
pub use crate::generators::{derive, PasswordGenerator, SubstitutionTable};
