//! SQLite envelope log implementation.
//!
//! Implements `EnvelopeRepository` from `wrelay-core` using sqlx with split
//! read/write pools. Rows are only ever inserted; ordering comes from the
//! stored timestamp with the autoincrement `seq` as tie-breaker.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::Row;

use wrelay_core::repository::envelope::EnvelopeRepository;
use wrelay_types::envelope::{Envelope, Sender};
use wrelay_types::error::RepositoryError;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `EnvelopeRepository`.
pub struct SqliteEnvelopeRepository {
    pool: DatabasePool,
}

impl SqliteEnvelopeRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Internal row type
// ---------------------------------------------------------------------------

struct EnvelopeRow {
    widget_id: String,
    message_id: String,
    text: String,
    sender: String,
    timestamp: String,
}

impl EnvelopeRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            widget_id: row.try_get("widget_id")?,
            message_id: row.try_get("message_id")?,
            text: row.try_get("text")?,
            sender: row.try_get("sender")?,
            timestamp: row.try_get("timestamp")?,
        })
    }

    fn into_envelope(self) -> Result<Envelope, RepositoryError> {
        let sender = self
            .sender
            .parse::<Sender>()
            .map_err(RepositoryError::Query)?;

        Ok(Envelope {
            widget_id: self.widget_id,
            message_id: self.message_id,
            text: self.text,
            sender,
            timestamp: parse_datetime(&self.timestamp)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Fixed-width UTC form, so lexical order in SQL equals time order.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// ---------------------------------------------------------------------------
// EnvelopeRepository impl
// ---------------------------------------------------------------------------

impl EnvelopeRepository for SqliteEnvelopeRepository {
    async fn append(&self, envelope: &Envelope) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO messages (widget_id, message_id, text, sender, timestamp)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(&envelope.widget_id)
        .bind(&envelope.message_id)
        .bind(&envelope.text)
        .bind(envelope.sender.to_string())
        .bind(format_datetime(&envelope.timestamp))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list_by_conversation(&self, widget_id: &str) -> Result<Vec<Envelope>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT widget_id, message_id, text, sender, timestamp
               FROM messages
               WHERE widget_id = ?
               ORDER BY timestamp ASC, seq ASC"#,
        )
        .bind(widget_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut envelopes = Vec::with_capacity(rows.len());
        for row in &rows {
            let r = EnvelopeRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            envelopes.push(r.into_envelope()?);
        }
        Ok(envelopes)
    }

    async fn count_by_conversation(&self, widget_id: &str) -> Result<u64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages WHERE widget_id = ?")
            .bind(widget_id)
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(count as u64)
    }
}
