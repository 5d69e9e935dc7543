//! Session records and the append-only store interface.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Focus,
    Break,
}

impl SessionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionKind::Focus => "focus",
            SessionKind::Break => "break",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus" => Ok(SessionKind::Focus),
            "break" => Ok(SessionKind::Break),
            other => Err(ValidationError::InvalidValue {
                field: "kind".into(),
                message: format!("unknown session kind '{other}'"),
            }),
        }
    }
}

/// One completed interval. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub kind: SessionKind,
    /// Planned length of the interval that completed.
    pub duration_minutes: u32,
    pub completed_at: DateTime<Utc>,
}

/// A record before the store has assigned its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSessionRecord {
    pub kind: SessionKind,
    pub duration_minutes: u32,
    pub completed_at: DateTime<Utc>,
}

impl NewSessionRecord {
    pub fn focus(duration_minutes: u32, completed_at: DateTime<Utc>) -> Self {
        Self {
            kind: SessionKind::Focus,
            duration_minutes,
            completed_at,
        }
    }
}

/// Append-only log of session records.
pub trait SessionStore {
    /// Append a record and return it with its assigned id.
    fn append(&mut self, record: NewSessionRecord) -> Result<SessionRecord>;

    /// Every record, in append order.
    fn records(&self) -> Result<Vec<SessionRecord>>;
}

/// Store that keeps records in memory for the life of the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: Vec<SessionRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn append(&mut self, record: NewSessionRecord) -> Result<SessionRecord> {
        let stored = SessionRecord {
            id: self.records.len() as i64 + 1,
            kind: record.kind,
            duration_minutes: record.duration_minutes,
            completed_at: record.completed_at,
        };
        self.records.push(stored.clone());
        Ok(stored)
    }

    fn records(&self) -> Result<Vec<SessionRecord>> {
        Ok(self.records.clone())
    }
}
