//! SQLite-backed record sink.
//!
//! One table per record kind, keyed by record id. Upserts use
//! `INSERT OR REPLACE`, so replaying a bundle is a no-op on the stored data.
//!
//! ## Feature flag
//! This module is only compiled when the `sqlite` feature is enabled:
//! ```toml
//! chainbundle-storage = { version = "...", features = ["sqlite"] }
//! ```
//!
//! ## Schema
//! ```sql
//! CREATE TABLE transfer_events (
//!     id           TEXT    PRIMARY KEY,
//!     block_number INTEGER NOT NULL,
//!     timestamp    INTEGER NOT NULL,
//!     from_address TEXT    NOT NULL,
//!     to_address   TEXT    NOT NULL,
//!     value        TEXT    NOT NULL   -- decimal
//! );
//! CREATE TABLE approve_calls (
//!     id           TEXT    PRIMARY KEY,
//!     block_number INTEGER NOT NULL,
//!     timestamp    INTEGER NOT NULL,
//!     spender      TEXT    NOT NULL,
//!     value        TEXT    NOT NULL
//! );
//! ```

use rusqlite::{params, Connection, OptionalExtension};
use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use chainbundle_core::error::SinkError;
use chainbundle_core::record::{ApprovalRecord, Record, RecordId, RecordKind, TransferRecord};
use chainbundle_core::sink::RecordSink;

/// SQLite record sink.
///
/// Thread-safe via an internal `Arc<Mutex<Connection>>`.
#[derive(Clone)]
pub struct SqliteSink {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSink {
    /// Open (or create) a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let conn = Connection::open(path.as_ref()).map_err(sqlite_err)?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
            .map_err(sqlite_err)?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS transfer_events (
                id           TEXT    PRIMARY KEY,
                block_number INTEGER NOT NULL,
                timestamp    INTEGER NOT NULL,
                from_address TEXT    NOT NULL,
                to_address   TEXT    NOT NULL,
                value        TEXT    NOT NULL
            );
            CREATE TABLE IF NOT EXISTS approve_calls (
                id           TEXT    PRIMARY KEY,
                block_number INTEGER NOT NULL,
                timestamp    INTEGER NOT NULL,
                spender      TEXT    NOT NULL,
                value        TEXT    NOT NULL
            );",
        )
        .map_err(sqlite_err)?;

        tracing::debug!(path = %path.as_ref().display(), "opened sqlite sink");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory database (useful for tests).
    pub fn in_memory() -> Result<Self, SinkError> {
        Self::open(":memory:")
    }

    /// Number of stored records of one kind.
    pub fn count(&self, kind: RecordKind) -> Result<usize, SinkError> {
        let conn = self.conn.lock().map_err(|_| SinkError::Poisoned)?;
        let sql = match kind {
            RecordKind::Transfer => "SELECT COUNT(*) FROM transfer_events",
            RecordKind::Approval => "SELECT COUNT(*) FROM approve_calls",
        };
        let n: i64 = conn.query_row(sql, [], |row| row.get(0)).map_err(sqlite_err)?;
        Ok(n as usize)
    }

    /// Load a stored record by id.
    pub fn get(&self, id: &RecordId) -> Result<Option<Record>, SinkError> {
        let conn = self.conn.lock().map_err(|_| SinkError::Poisoned)?;

        let transfer = conn
            .query_row(
                "SELECT block_number, timestamp, from_address, to_address, value
                 FROM transfer_events WHERE id = ?1",
                params![id.as_str()],
                |row| {
                    Ok((
                        row.get::<_, i32>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()
            .map_err(sqlite_err)?;

        if let Some((block_number, timestamp, from, to, value)) = transfer {
            return Ok(Some(Record::Transfer(TransferRecord {
                id: id.clone(),
                block_number,
                timestamp,
                from,
                to,
                value: parse_value(&value)?,
            })));
        }

        let approval = conn
            .query_row(
                "SELECT block_number, timestamp, spender, value
                 FROM approve_calls WHERE id = ?1",
                params![id.as_str()],
                |row| {
                    Ok((
                        row.get::<_, i32>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()
            .map_err(sqlite_err)?;

        Ok(match approval {
            Some((block_number, timestamp, spender, value)) => {
                Some(Record::Approval(ApprovalRecord {
                    id: id.clone(),
                    block_number,
                    timestamp,
                    spender,
                    value: parse_value(&value)?,
                }))
            }
            None => None,
        })
    }
}

impl RecordSink for SqliteSink {
    fn upsert(&self, record: Record) -> Result<(), SinkError> {
        let conn = self.conn.lock().map_err(|_| SinkError::Poisoned)?;
        match &record {
            Record::Transfer(r) => conn.execute(
                "INSERT OR REPLACE INTO transfer_events
                    (id, block_number, timestamp, from_address, to_address, value)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    r.id.as_str(),
                    r.block_number,
                    r.timestamp,
                    &r.from,
                    &r.to,
                    r.value.to_string(),
                ],
            ),
            Record::Approval(r) => conn.execute(
                "INSERT OR REPLACE INTO approve_calls
                    (id, block_number, timestamp, spender, value)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    r.id.as_str(),
                    r.block_number,
                    r.timestamp,
                    &r.spender,
                    r.value.to_string(),
                ],
            ),
        }
        .map_err(sqlite_err)?;
        Ok(())
    }
}

fn sqlite_err(e: rusqlite::Error) -> SinkError {
    SinkError::Database(format!("sqlite error: {e}"))
}

fn parse_value(s: &str) -> Result<num_bigint::BigUint, SinkError> {
    s.parse()
        .map_err(|e| SinkError::Database(format!("stored value '{s}' is not decimal: {e}")))
}
