// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed storage for the mutation queue and the work-order cache.
//!
//! The [`Database`] struct provides all data access operations. Queue rows
//! keep their insertion order through `rowid`; every drain-order guarantee
//! rides on that.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::clock::millis_to_utc;
use crate::error::{Error, Result};
use crate::mutation::{ItemStatus, QueueItem};
use crate::work_order::{CacheEntry, WorkOrder};

/// SQL schema for the sync agent database.
pub const SCHEMA: &str = r#"
-- Durable mutation queue. Completed items are deleted, so every row
-- present is still awaiting delivery.
CREATE TABLE IF NOT EXISTS queue (
    id TEXT PRIMARY KEY,
    kind TEXT NOT NULL,
    work_order_id TEXT NOT NULL,
    payload TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    retry_count INTEGER NOT NULL DEFAULT 0,
    last_error TEXT,
    enqueued_at TEXT NOT NULL
);

-- Work-order snapshots kept for offline reads. Timestamps are epoch
-- milliseconds so expiry checks stay in SQL.
CREATE TABLE IF NOT EXISTS work_order_cache (
    work_order_id TEXT PRIMARY KEY,
    snapshot TEXT NOT NULL,
    cached_at INTEGER NOT NULL,
    expires_at INTEGER NOT NULL
);

-- Agent state that must survive restarts, e.g. the last completed sync.
CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_queue_status ON queue(status);
CREATE INDEX IF NOT EXISTS idx_queue_work_order ON queue(work_order_id);
CREATE INDEX IF NOT EXISTS idx_cache_expires ON work_order_cache(expires_at);
"#;

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value.parse().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!(
                "invalid value '{value}' in column '{column}'"
            ))),
        )
    })
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(Error::CorruptedData(format!(
                    "invalid timestamp '{value}' in column '{column}'"
                ))),
            )
        })
}

/// Parse an epoch-milliseconds timestamp from the database.
fn parse_millis(value: i64, column: &str) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    millis_to_utc(value.max(0) as u64).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Integer,
            Box::new(Error::CorruptedData(format!(
                "timestamp {value} out of range in column '{column}'"
            ))),
        )
    })
}

/// Parse a JSON column from the database.
fn parse_json<T: serde::de::DeserializeOwned>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    serde_json::from_str(value).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(Error::CorruptedData(format!("invalid JSON in column '{column}'"))),
        )
    })
}

/// Map a queue row in SELECT column order:
/// id, kind, work_order_id, payload, status, retry_count, last_error, enqueued_at.
fn read_item_row(row: &rusqlite::Row<'_>) -> std::result::Result<QueueItem, rusqlite::Error> {
    let kind_str: String = row.get(1)?;
    let payload_str: String = row.get(3)?;
    let status_str: String = row.get(4)?;
    let enqueued_str: String = row.get(7)?;

    Ok(QueueItem {
        id: row.get(0)?,
        kind: parse_db(&kind_str, "kind")?,
        work_order_id: row.get(2)?,
        payload: parse_json(&payload_str, "payload")?,
        status: parse_db(&status_str, "status")?,
        retry_count: row.get(5)?,
        last_error: row.get(6)?,
        enqueued_at: parse_timestamp(&enqueued_str, "enqueued_at")?,
    })
}

const ITEM_COLUMNS: &str =
    "id, kind, work_order_id, payload, status, retry_count, last_error, enqueued_at";

/// Map a cache row in SELECT column order:
/// snapshot, cached_at, expires_at.
fn read_cache_row(row: &rusqlite::Row<'_>) -> std::result::Result<CacheEntry, rusqlite::Error> {
    let snapshot_str: String = row.get(0)?;
    let cached_ms: i64 = row.get(1)?;
    let expires_ms: i64 = row.get(2)?;

    Ok(CacheEntry {
        work_order: parse_json(&snapshot_str, "snapshot")?,
        cached_at: parse_millis(cached_ms, "cached_at")?,
        expires_at: parse_millis(expires_ms, "expires_at")?,
    })
}

/// Run schema creation and all migrations on a database connection.
///
/// This is the single migration path for every consumer of the database.
/// It applies the canonical schema and runs idempotent migrations to
/// upgrade older databases that may be missing columns.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    migrate_add_last_error(conn)?;
    Ok(())
}

/// Migration: add the last_error column to queues created before failure
/// messages were recorded.
fn migrate_add_last_error(conn: &Connection) -> Result<()> {
    let has_column: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM pragma_table_info('queue') WHERE name = 'last_error'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);

    if !has_column {
        conn.execute("ALTER TABLE queue ADD COLUMN last_error TEXT", [])?;
    }
    Ok(())
}

/// SQLite database connection with queue and cache operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Enable foreign keys and WAL mode for concurrency
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    // ---- queue ----

    /// Insert a new queue item.
    pub fn insert_item(&self, item: &QueueItem) -> Result<()> {
        self.conn.execute(
            "INSERT INTO queue (id, kind, work_order_id, payload, status,
             retry_count, last_error, enqueued_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                item.id,
                item.kind.as_str(),
                item.work_order_id,
                serde_json::to_string(&item.payload)?,
                item.status.as_str(),
                item.retry_count,
                item.last_error,
                item.enqueued_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Get a queue item by ID.
    pub fn get_item(&self, id: &str) -> Result<QueueItem> {
        let item = self
            .conn
            .query_row(
                &format!("SELECT {ITEM_COLUMNS} FROM queue WHERE id = ?1"),
                params![id],
                read_item_row,
            )
            .optional()?;

        item.ok_or_else(|| Error::ItemNotFound(id.to_string()))
    }

    /// Check if a queue item exists.
    pub fn item_exists(&self, id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM queue WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// List all queue items in insertion order.
    pub fn list_items(&self) -> Result<Vec<QueueItem>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {ITEM_COLUMNS} FROM queue ORDER BY rowid"))?;

        let items = stmt
            .query_map([], read_item_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(items)
    }

    /// List queue items in a given status, in insertion order.
    pub fn list_items_with_status(&self, status: ItemStatus) -> Result<Vec<QueueItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM queue WHERE status = ?1 ORDER BY rowid"
        ))?;

        let items = stmt
            .query_map(params![status.as_str()], read_item_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(items)
    }

    /// List items eligible for the next drain pass, in insertion order:
    /// pending items plus failed items still under the retry cap.
    pub fn list_drainable(&self, max_retries: u32) -> Result<Vec<QueueItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM queue
             WHERE status = 'pending' OR (status = 'failed' AND retry_count < ?1)
             ORDER BY rowid"
        ))?;

        let items = stmt
            .query_map(params![max_retries], read_item_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(items)
    }

    /// List queue items targeting a work order, in insertion order.
    pub fn items_for_work_order(&self, work_order_id: &str) -> Result<Vec<QueueItem>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM queue WHERE work_order_id = ?1 ORDER BY rowid"
        ))?;

        let items = stmt
            .query_map(params![work_order_id], read_item_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(items)
    }

    /// Update a queue item's status.
    pub fn set_item_status(&mut self, id: &str, status: ItemStatus) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE queue SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id],
        )?;

        if affected == 0 {
            return Err(Error::ItemNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Reset items stuck in processing back to pending. A processing row
    /// is an in-flight marker; finding one outside a drain pass means the
    /// process that claimed it died. Returns how many were reset.
    pub fn recover_in_flight(&mut self) -> Result<u64> {
        let affected = self
            .conn
            .execute("UPDATE queue SET status = 'pending' WHERE status = 'processing'", [])?;
        Ok(affected as u64)
    }

    /// Record a failed delivery attempt: sets failed status, bumps the
    /// retry count, and stores the error message.
    pub fn record_item_failure(&mut self, id: &str, error: &str) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE queue SET status = 'failed', retry_count = retry_count + 1,
             last_error = ?1 WHERE id = ?2",
            params![error, id],
        )?;

        if affected == 0 {
            return Err(Error::ItemNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Delete a queue item. Returns whether a row was removed.
    pub fn delete_item(&mut self, id: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM queue WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    /// Count all queue items.
    pub fn count_items(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM queue", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    /// Count queue items in a given status.
    pub fn count_items_with_status(&self, status: ItemStatus) -> Result<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM queue WHERE status = ?1",
            params![status.as_str()],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }

    /// Count failed items that have used up their retry budget.
    pub fn count_exhausted(&self, max_retries: u32) -> Result<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM queue WHERE status = 'failed' AND retry_count >= ?1",
            params![max_retries],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }

    // ---- work-order cache ----

    /// Store or overwrite the cache entry for an entry's work order.
    pub fn put_cache_entry(&mut self, entry: &CacheEntry) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO work_order_cache
             (work_order_id, snapshot, cached_at, expires_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.work_order.id,
                serde_json::to_string(&entry.work_order)?,
                entry.cached_at.timestamp_millis(),
                entry.expires_at.timestamp_millis(),
            ],
        )?;
        Ok(())
    }

    /// Get the stored cache entry for a work order, expired or not.
    ///
    /// Expiry is a read-side policy; callers go through
    /// [`crate::cache::WorkOrderCache`] for TTL-aware reads.
    pub fn get_cache_entry(&self, work_order_id: &str) -> Result<Option<CacheEntry>> {
        let entry = self
            .conn
            .query_row(
                "SELECT snapshot, cached_at, expires_at FROM work_order_cache
                 WHERE work_order_id = ?1",
                params![work_order_id],
                read_cache_row,
            )
            .optional()?;
        Ok(entry)
    }

    /// Delete a cache entry. Returns whether a row was removed.
    pub fn delete_cache_entry(&mut self, work_order_id: &str) -> Result<bool> {
        let affected = self.conn.execute(
            "DELETE FROM work_order_cache WHERE work_order_id = ?1",
            params![work_order_id],
        )?;
        Ok(affected > 0)
    }

    /// Remove every entry expired as of `now_ms`. Returns how many went.
    pub fn purge_expired_entries(&mut self, now_ms: u64) -> Result<usize> {
        let affected = self.conn.execute(
            "DELETE FROM work_order_cache WHERE expires_at <= ?1",
            params![now_ms as i64],
        )?;
        Ok(affected)
    }

    /// Count live (unexpired) cache entries as of `now_ms`.
    pub fn count_live_entries(&self, now_ms: u64) -> Result<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM work_order_cache WHERE expires_at > ?1",
            params![now_ms as i64],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }

    /// List live (unexpired) cache entries as of `now_ms`, newest first.
    pub fn list_live_entries(&self, now_ms: u64) -> Result<Vec<CacheEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT snapshot, cached_at, expires_at FROM work_order_cache
             WHERE expires_at > ?1 ORDER BY cached_at DESC, work_order_id",
        )?;

        let entries = stmt
            .query_map(params![now_ms as i64], read_cache_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Get the live snapshot for a work order, if any.
    pub fn get_live_work_order(&self, work_order_id: &str, now_ms: u64) -> Result<Option<WorkOrder>> {
        Ok(self
            .get_cache_entry(work_order_id)?
            .filter(|entry| entry.expires_at.timestamp_millis() > now_ms as i64)
            .map(|entry| entry.work_order))
    }

    // ---- meta ----

    /// When the last drain pass ran to completion, if ever.
    pub fn get_last_sync(&self) -> Result<Option<DateTime<Utc>>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'last_sync'",
                [],
                |row| row.get(0),
            )
            .optional()?;

        match value {
            Some(raw) => Ok(Some(parse_timestamp(&raw, "last_sync")?)),
            None => Ok(None),
        }
    }

    /// Record the completion time of a drain pass.
    pub fn set_last_sync(&mut self, at: DateTime<Utc>) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO meta (key, value) VALUES ('last_sync', ?1)",
            params![at.to_rfc3339()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
