//! Fieldmap Storage Layer
//!
//! Implements the `FeedbackStore` trait on SQLite.
//!
//! Feedback is append-only. Each submitted batch is written in a single
//! transaction, so a batch is either stored completely or not at all.
//!
//! # Examples
//!
//! ```no_run
//! use fieldmap_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! assert_eq!(store.count().unwrap(), 0);
//! ```

#![warn(missing_docs)]

use fieldmap_domain::traits::FeedbackStore;
use fieldmap_domain::{FeedbackEntry, FeedbackId, FeedbackRecord};
use rusqlite::{params, Connection};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Entry or rationale could not be (de)serialised
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored row does not hold a valid record
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of `FeedbackStore`
///
/// # Thread Safety
///
/// SQLite connections are not `Sync`. Share a store between tasks behind a
/// mutex.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    /// Number of feedback records stored
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM feedback", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Records stored for one request, oldest first
    pub fn records_for_request(&self, request_id: &str) -> Result<Vec<FeedbackRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, request_id, strategy, model, entry, created_at
             FROM feedback WHERE request_id = ?1 ORDER BY created_at, id",
        )?;

        let rows = stmt
            .query_map(params![request_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, i64>(5)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, request_id, strategy, model, entry, created_at)| {
                let id = FeedbackId::from_string(&id).map_err(StoreError::InvalidData)?;
                let entry: FeedbackEntry = serde_json::from_str(&entry)?;
                Ok(FeedbackRecord {
                    id,
                    entry,
                    strategy,
                    model,
                    request_id,
                    created_at: created_at as u64,
                })
            })
            .collect()
    }
}

impl FeedbackStore for SqliteStore {
    type Error = StoreError;

    fn append_feedback(&mut self, records: &[FeedbackRecord]) -> Result<usize, Self::Error> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO feedback (id, request_id, source, target, accepted, confidence,
                    strategy, model, target_document, rationale, entry, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )?;

            for record in records {
                let rationale = record
                    .entry
                    .rationale
                    .as_ref()
                    .map(serde_json::to_string)
                    .transpose()?;
                let entry = serde_json::to_string(&record.entry)?;

                stmt.execute(params![
                    record.id.to_string(),
                    record.request_id,
                    record.entry.source,
                    record.entry.target,
                    record.entry.accepted,
                    record.entry.confidence,
                    record.strategy,
                    record.model,
                    record.entry.target_document,
                    rationale,
                    entry,
                    record.created_at as i64,
                ])?;
            }
        }
        tx.commit()?;

        debug!("Stored {} feedback records", records.len());
        Ok(records.len())
    }
}
