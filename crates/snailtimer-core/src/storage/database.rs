//! SQLite-based session storage.
//!
//! Provides persistent storage for:
//! - Completed session records (append-only)
//! - Key-value store for front-end state such as the task list

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::data_dir;
use super::record::{NewSessionRecord, SessionKind, SessionRecord, SessionStore};
use crate::error::{DatabaseError, Result};

/// SQLite database for session records.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/snailtimer.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("snailtimer.db"))
    }

    /// Open (or create) the database file at `path`.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS session_records (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                kind         TEXT NOT NULL,
                duration_min INTEGER NOT NULL CHECK (duration_min > 0),
                completed_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_session_records_completed_at ON session_records(completed_at);",
        )?;
        Ok(())
    }

    /// Append a completed session record.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn append_record(&self, record: &NewSessionRecord) -> Result<SessionRecord> {
        self.conn.execute(
            "INSERT INTO session_records (kind, duration_min, completed_at)
             VALUES (?1, ?2, ?3)",
            params![
                record.kind.as_str(),
                record.duration_minutes,
                record.completed_at.to_rfc3339(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, kind = %record.kind, minutes = record.duration_minutes, "session record appended");
        Ok(SessionRecord {
            id,
            kind: record.kind,
            duration_minutes: record.duration_minutes,
            completed_at: record.completed_at,
        })
    }

    /// All session records in append order.
    pub fn list_records(&self) -> Result<Vec<SessionRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, kind, duration_min, completed_at
             FROM session_records
             ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, kind, duration_minutes, completed_at) = row?;
            let kind: SessionKind = kind.parse().map_err(|e| DatabaseError::CorruptRow {
                id,
                message: format!("{e}"),
            })?;
            let completed_at = DateTime::parse_from_rfc3339(&completed_at)
                .map_err(|e| DatabaseError::CorruptRow {
                    id,
                    message: format!("bad completed_at: {e}"),
                })?
                .with_timezone(&Utc);
            records.push(SessionRecord {
                id,
                kind,
                duration_minutes,
                completed_at,
            });
        }
        Ok(records)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl SessionStore for Database {
    fn append(&mut self, record: NewSessionRecord) -> Result<SessionRecord> {
        self.append_record(&record)
    }

    fn records(&self) -> Result<Vec<SessionRecord>> {
        self.list_records()
    }
}
