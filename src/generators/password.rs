// src/generators/password.rs
use serde::Serialize;
use thiserror::Error;

use super::random;
use super::substitution::SubstitutionTable;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("A length is required when no base is given")]
    MissingLength,

    #[error("Invalid length {0}: must be a positive number")]
    InvalidLength(i64),

    #[error("The base derives to an empty password")]
    EmptyDerivation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMethod {
    Derived,
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generated {
    pub value: String,
    pub base: Option<String>,
    pub method: GenerationMethod,
}

pub struct PasswordGenerator {
    table: SubstitutionTable,
}

impl PasswordGenerator {
    pub fn new(table: SubstitutionTable) -> Self {
        PasswordGenerator { table }
    }

    pub fn table(&self) -> &SubstitutionTable {
        &self.table
    }

    /// A non-empty `base` is derived through the table and `length` is ignored.
    /// Otherwise a random password of `length` characters is produced; `length`
    /// must then be present and positive.
    pub fn generate_password(
        &self,
        base: Option<&str>,
        length: Option<i64>,
    ) -> Result<Generated, GenerationError> {
        if let Some(base) = base.filter(|b| !b.is_empty()) {
            let value = self.table.derive(base);
            if value.is_empty() {
                return Err(GenerationError::EmptyDerivation);
            }
            return Ok(Generated {
                value,
                base: Some(base.to_string()),
                method: GenerationMethod::Derived,
            });
        }

        let length = validate_length(length)?;
        Ok(Generated {
            value: random::generate(length),
            base: None,
            method: GenerationMethod::Random,
        })
    }
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new(SubstitutionTable::classic())
    }
}

fn validate_length(length: Option<i64>) -> Result<usize, GenerationError> {
    match length {
        None => Err(GenerationError::MissingLength),
        Some(n) if n <= 0 => Err(GenerationError::InvalidLength(n)),
        // Only unrepresentable on targets where usize is narrower than i64
        Some(n) => usize::try_from(n).map_err(|_| GenerationError::InvalidLength(n)),
    }
}
