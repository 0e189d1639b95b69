// src/db/sqlite.rs
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::Mutex;

use crate::models::{format_timestamp, parse_timestamp, NewPasswordRecord, PasswordRecord};
use super::{DbError, PasswordStore};

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS passwords (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        value TEXT NOT NULL,
        base TEXT,
        label TEXT,
        created_at TEXT NOT NULL,
        owner TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_passwords_owner ON passwords(owner);
"#;

const SELECT_COLUMNS: &str = "SELECT id, value, base, label, created_at, owner FROM passwords";

#[derive(Debug)]
pub struct SqliteBackend {
    conn: Mutex<Connection>,
    path: String,
}

impl SqliteBackend {
    /// Opens (creating if needed) the database at `path` and ensures the schema.
    /// `:memory:` gives a private in-memory database.
    pub fn open(path: &str) -> Result<Self, DbError> {
        let conn = if path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            // Create the database directory if it doesn't exist
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        DbError::IoError(format!("Failed to create database directory: {}", e))
                    })?;
                }
            }
            Connection::open(path)?
        };

        log::info!("Initializing SQLite database at: {}", path);
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: path.to_string(),
        })
    }

    /// Runs `f` with exclusive access to the connection.
    pub(crate) fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, DbError>,
    ) -> Result<T, DbError> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        f(&conn)
    }

    pub fn close(self) -> Result<(), DbError> {
        let conn = self.conn.into_inner().map_err(|_| DbError::LockPoisoned)?;
        conn.close().map_err(|(_, e)| DbError::from(e))?;
        log::debug!("Closed SQLite database at: {}", self.path);
        Ok(())
    }
}

// Raw column values; the timestamp is parsed outside the rusqlite closure so a bad
// value surfaces as a corrupt record rather than a driver error.
struct RawRow {
    id: i64,
    value: String,
    base: Option<String>,
    label: Option<String>,
    created_at: String,
    owner: Option<String>,
}

impl RawRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            value: row.get(1)?,
            base: row.get(2)?,
            label: row.get(3)?,
            created_at: row.get(4)?,
            owner: row.get(5)?,
        })
    }

    fn into_record(self) -> Result<PasswordRecord, DbError> {
        let created_at = parse_timestamp(&self.created_at).map_err(|e| DbError::CorruptRecord {
            id: self.id,
            reason: format!("bad created_at '{}': {}", self.created_at, e),
        })?;
        Ok(PasswordRecord {
            id: self.id,
            value: self.value,
            base: self.base,
            label: self.label,
            created_at,
            owner: self.owner,
        })
    }
}

impl PasswordStore for SqliteBackend {
    fn append(&self, record: &NewPasswordRecord) -> Result<i64, DbError> {
        self.with_connection(|conn| {
            conn.execute(
                r#"
                INSERT INTO passwords (value, base, label, created_at, owner)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    record.value,
                    record.base,
                    record.label,
                    format_timestamp(&record.created_at),
                    record.owner,
                ],
            )?;
            let id = conn.last_insert_rowid();
            log::debug!("Stored password record {}", id);
            Ok(id)
        })
    }

    fn list(&self, owner: Option<&str>) -> Result<Vec<PasswordRecord>, DbError> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{} WHERE (?1 IS NULL OR owner = ?1) ORDER BY id ASC",
                SELECT_COLUMNS
            ))?;
            let rows = stmt
                .query_map(params![owner], RawRow::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows.into_iter().map(RawRow::into_record).collect()
        })
    }

    fn get(&self, id: i64, owner: Option<&str>) -> Result<Option<PasswordRecord>, DbError> {
        self.with_connection(|conn| {
            let raw = conn
                .query_row(
                    &format!("{} WHERE id = ?1 AND (?2 IS NULL OR owner = ?2)", SELECT_COLUMNS),
                    params![id, owner],
                    RawRow::from_row,
                )
                .optional()?;
            raw.map(RawRow::into_record).transpose()
        })
    }

    fn delete(&self, id: i64, owner: Option<&str>) -> Result<bool, DbError> {
        self.with_connection(|conn| {
            let removed = conn.execute(
                "DELETE FROM passwords WHERE id = ?1 AND (?2 IS NULL OR owner = ?2)",
                params![id, owner],
            )?;
            log::debug!("Delete of record {} removed {} row(s)", id, removed);
            Ok(removed > 0)
        })
    }

    fn delete_all(&self, owner: Option<&str>) -> Result<usize, DbError> {
        self.with_connection(|conn| {
            let removed = conn.execute(
                "DELETE FROM passwords WHERE (?1 IS NULL OR owner = ?1)",
                params![owner],
            )?;
            log::debug!("Bulk delete removed {} row(s)", removed);
            Ok(removed)
        })
    }

    fn count(&self, owner: Option<&str>) -> Result<usize, DbError> {
        self.with_connection(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM passwords WHERE (?1 IS NULL OR owner = ?1)",
                params![owner],
                |row| row.get(0),
            )?;
            Ok(count as usize)
        })
    }
}
