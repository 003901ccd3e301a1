use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::error::StoreError;
use crate::models::RiskAssessment;

/// Entries kept unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub url: String,
    /// RFC 3339, UTC, millisecond precision.
    pub timestamp: String,
    pub risk_score: f64,
    pub is_phishing: bool,
}

impl HistoryEntry {
    pub fn new(url: &str, assessment: &RiskAssessment) -> Self {
        HistoryEntry {
            url: url.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            risk_score: assessment.risk_score,
            is_phishing: assessment.is_phishing,
        }
    }
}

/// Size-capped, newest-first log of past analyses.
pub struct Database {
    conn: Mutex<Connection>,
    limit: usize,
}

impl Database {
    pub fn new(path: impl AsRef<Path>, limit: usize) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open(path)?, limit)
    }

    pub fn in_memory(limit: usize) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?, limit)
    }

    fn with_connection(conn: Connection, limit: usize) -> Result<Self, StoreError> {
        let db = Database {
            conn: Mutex::new(conn),
            limit,
        };
        db.init()?;
        Ok(db)
    }

    fn init(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                url TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                risk_score REAL NOT NULL,
                is_phishing INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Append an entry, then drop everything older than the newest `limit`.
    pub fn record(&self, entry: &HistoryEntry) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO history (url, timestamp, risk_score, is_phishing) VALUES (?1, ?2, ?3, ?4)",
            params![entry.url, entry.timestamp, entry.risk_score, entry.is_phishing],
        )?;
        let trimmed = conn.execute(
            "DELETE FROM history WHERE id NOT IN (
                SELECT id FROM history ORDER BY id DESC LIMIT ?1
            )",
            params![self.limit as i64],
        )?;
        if trimmed > 0 {
            debug!(trimmed, limit = self.limit, "trimmed history");
        }
        Ok(())
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT url, timestamp, risk_score, is_phishing
             FROM history ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(HistoryEntry {
                url: row.get(0)?,
                timestamp: row.get(1)?,
                risk_score: row.get(2)?,
                is_phishing: row.get(3)?,
            })
        })?;
        let entries = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    pub fn clear(&self) -> Result<usize, StoreError> {
        let conn = self.lock()?;
        Ok(conn.execute("DELETE FROM history", [])?)
    }
}
