// src/db/mod.rs
use crate::models::{NewPasswordRecord, PasswordRecord};
use thiserror::Error;

pub mod memory;
pub mod sqlite;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    SqliteError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Stored record {id} is corrupt: {reason}")]
    CorruptRecord { id: i64, reason: String },

    #[error("Database handle is unusable after a panic in another caller")]
    LockPoisoned,
}

impl DbError {
    /// Infrastructure failures may succeed on a later attempt; bad configuration and
    /// corrupt rows will not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DbError::SqliteError(_) | DbError::IoError(_) | DbError::LockPoisoned
        )
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(error: rusqlite::Error) -> Self {
        DbError::SqliteError(error.to_string())
    }
}

impl From<std::io::Error> for DbError {
    fn from(error: std::io::Error) -> Self {
        DbError::IoError(error.to_string())
    }
}

/// Storage contract shared by every backend.
///
/// `owner = None` disables scoping: every record is visible and deletable.
/// Listing is in ascending id order, which is insertion order since ids are
/// never reused.
pub trait PasswordStore: Send + Sync {
    fn append(&self, record: &NewPasswordRecord) -> Result<i64, DbError>;

    fn list(&self, owner: Option<&str>) -> Result<Vec<PasswordRecord>, DbError>;

    fn get(&self, id: i64, owner: Option<&str>) -> Result<Option<PasswordRecord>, DbError>;

    /// Returns whether a record was removed. A missing id is not an error.
    fn delete(&self, id: i64, owner: Option<&str>) -> Result<bool, DbError>;

    fn delete_all(&self, owner: Option<&str>) -> Result<usize, DbError>;

    fn count(&self, owner: Option<&str>) -> Result<usize, DbError>;
}

#[derive(Debug)]
pub enum DatabaseType {
    Sqlite(sqlite::SqliteBackend),
    Memory(memory::MemoryBackend),
}

/// Explicitly passed storage handle. The connection is opened in [`Database::new`]
/// and released when the handle is dropped or [`Database::close`]d.
#[derive(Debug)]
pub struct Database {
    pub backend: DatabaseType,
}

impl Database {
    /// Picks the backend from the location string:
    /// `memory:` for the process-local store, `sqlite::memory:` for an in-memory
    /// SQLite database, `sqlite:<path>` or a bare path for a SQLite file.
    pub fn new(location: &str) -> Result<Self, DbError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(DbError::ConfigError("Empty database location".into()));
        }

        let backend = if location == "memory:" {
            DatabaseType::Memory(memory::MemoryBackend::new())
        } else {
            let path = location.strip_prefix("sqlite:").unwrap_or(location);
            if path.is_empty() {
                return Err(DbError::ConfigError(format!("Invalid SQLite location '{}'", location)));
            }
            DatabaseType::Sqlite(sqlite::SqliteBackend::open(path)?)
        };

        Ok(Self { backend })
    }

    pub fn in_memory() -> Self {
        Self {
            backend: DatabaseType::Memory(memory::MemoryBackend::new()),
        }
    }

    fn store(&self) -> &dyn PasswordStore {
        match &self.backend {
            DatabaseType::Sqlite(backend) => backend,
            DatabaseType::Memory(backend) => backend,
        }
    }

    pub fn get_backend_type(&self) -> &str {
        match &self.backend {
            DatabaseType::Sqlite(_) => "SQLite",
            DatabaseType::Memory(_) => "Memory",
        }
    }

    #[cfg(test)]
    pub(crate) fn get_sqlite_backend(&self) -> Option<&sqlite::SqliteBackend> {
        match &self.backend {
            DatabaseType::Sqlite(backend) => Some(backend),
            _ => None,
        }
    }

    /// Closes the underlying connection, reporting any error instead of swallowing it on drop.
    pub fn close(self) -> Result<(), DbError> {
        match self.backend {
            DatabaseType::Sqlite(backend) => backend.close(),
            DatabaseType::Memory(_) => Ok(()),
        }
    }
}

impl PasswordStore for Database {
    fn append(&self, record: &NewPasswordRecord) -> Result<i64, DbError> {
        self.store().append(record)
    }

    fn list(&self, owner: Option<&str>) -> Result<Vec<PasswordRecord>, DbError> {
        self.store().list(owner)
    }

    fn get(&self, id: i64, owner: Option<&str>) -> Result<Option<PasswordRecord>, DbError> {
        self.store().get(id, owner)
    }

    fn delete(&self, id: i64, owner: Option<&str>) -> Result<bool, DbError> {
        self.store().delete(id, owner)
    }

    fn delete_all(&self, owner: Option<&str>) -> Result<usize, DbError> {
        self.store().delete_all(owner)
    }

    fn count(&self, owner: Option<&str>) -> Result<usize, DbError> {
        self.store().count(owner)
    }
}

// Function to initialize the database
pub fn init_db(location: &str) -> Result<Database, DbError> {
    log::debug!("Opening password store at '{}'", location);
    Database::new(location)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_backend_from_location() {
        assert_eq!(Database::new("memory:").unwrap().get_backend_type(), "Memory");
        assert_eq!(Database::new("sqlite::memory:").unwrap().get_backend_type(), "SQLite");
    }

    #[test]
    fn bare_path_opens_sqlite_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("senhas.db");
        let db = Database::new(path.to_str().unwrap()).unwrap();
        assert!(db.get_sqlite_backend().is_some());
        assert!(path.exists());
        db.close().unwrap();
    }

    #[test]
    fn rejects_empty_locations() {
        assert!(matches!(Database::new("  "), Err(DbError::ConfigError(_))));
        assert!(matches!(Database::new("sqlite:"), Err(DbError::ConfigError(_))));
    }

    #[test]
    fn storage_errors_are_retryable() {
        assert!(DbError::SqliteError("locked".into()).is_retryable());
        assert!(DbError::LockPoisoned.is_retryable());
        assert!(!DbError::ConfigError("bad".into()).is_retryable());
        assert!(!DbError::CorruptRecord { id: 1, reason: "x".into() }.is_retryable());
    }
}
