//! Audit log — SQLite-based history of applied changes.
//!
//! Every create/update that reconciliation applies, plus one summary row
//! per run, is stored in `<state_dir>/audit.db`. Only secret names are
//! recorded, never values.
//!
//! Logging degrades gracefully: if the database can't be opened or
//! written to, reconciliation continues without it.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::config::Config;
use crate::errors::{EnvSyncError, Result};
use crate::reconcile::{Change, Direction};

/// A single audit log entry.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    pub environment: String,
    pub key_name: Option<String>,
    pub details: Option<String>,
}

/// SQLite-backed audit log.
pub struct AuditLog {
    conn: Connection,
}

impl AuditLog {
    /// Open (or create) the audit database at `<state_dir>/audit.db`.
    ///
    /// Returns `None` if the database can't be opened; callers should
    /// treat this as "audit logging unavailable" and continue normally.
    pub fn open(state_dir: &Path) -> Option<Self> {
        let db_path = Self::db_path(state_dir);
        let conn = Connection::open(&db_path).ok()?;

        // Owner-only: key names can be sensitive too.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&db_path, perms);
        }

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS audit_log (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp   TEXT NOT NULL,
                operation   TEXT NOT NULL,
                environment TEXT NOT NULL,
                key_name    TEXT,
                details     TEXT
            );",
        )
        .ok()?;

        Some(Self { conn })
    }

    /// Record an operation. Errors are ignored.
    pub fn log(
        &self,
        operation: &str,
        environment: &str,
        key_name: Option<&str>,
        details: Option<&str>,
    ) {
        let now = Utc::now().to_rfc3339();
        let _ = self.conn.execute(
            "INSERT INTO audit_log (timestamp, operation, environment, key_name, details)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![now, operation, environment, key_name, details],
        );
    }

    /// Query recent audit entries, most recent first.
    ///
    /// - `limit`: maximum number of entries to return.
    /// - `since`: if provided, only return entries newer than this timestamp.
    pub fn query(&self, limit: usize, since: Option<DateTime<Utc>>) -> Result<Vec<AuditEntry>> {
        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
        // RFC 3339 strings in UTC compare correctly as text.
        let since_str = since.map_or_else(String::new, |ts| ts.to_rfc3339());

        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, timestamp, operation, environment, key_name, details
                 FROM audit_log
                 WHERE timestamp >= ?1
                 ORDER BY id DESC
                 LIMIT ?2",
            )
            .map_err(|e| EnvSyncError::AuditError(format!("query prepare: {e}")))?;

        let rows = stmt
            .query_map(rusqlite::params![since_str, limit_i64], |row| {
                let ts_str: String = row.get(1)?;
                let timestamp = DateTime::parse_from_rfc3339(&ts_str)
                    .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

                Ok(AuditEntry {
                    id: row.get(0)?,
                    timestamp,
                    operation: row.get(2)?,
                    environment: row.get(3)?,
                    key_name: row.get(4)?,
                    details: row.get(5)?,
                })
            })
            .map_err(|e| EnvSyncError::AuditError(format!("query exec: {e}")))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(|e| EnvSyncError::AuditError(format!("row parse: {e}")))?);
        }

        Ok(entries)
    }

    /// Path to the audit database inside `state_dir`.
    pub fn db_path(state_dir: &Path) -> PathBuf {
        state_dir.join("audit.db")
    }
}

/// Record the changes a run applied, plus a summary row.
///
/// Creates the state directory on first use. Never fails the caller.
pub fn record_run(config: &Config, direction: Direction, changes: &[Change], outcome: &str) {
    if std::fs::create_dir_all(&config.state_dir).is_err() {
        return;
    }
    let Some(audit) = AuditLog::open(&config.state_dir) else {
        return;
    };

    let op = direction.as_str();
    for change in changes {
        audit.log(op, &config.environment, Some(&change.key), Some(&change.label()));
    }
    audit.log(op, &config.environment, None, Some(outcome));
}
