// src/generators/mod.rs
pub mod password;
pub mod random;
pub mod substitution;

pub use password::{Generated, GenerationError, GenerationMethod, PasswordGenerator};
pub use substitution::{derive, SubstitutionTable, TableError};
