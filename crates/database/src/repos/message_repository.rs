//! SQLite implementation of the message storage contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use messages_domain::{MessageResult, MessageSnapshot, MessageStore};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::{debug, info};

use crate::connection::DatabaseHandle;
use crate::types::{DatabaseError, DatabaseResult};

/// Message store backed by the shared SQLite pool
#[derive(Clone)]
pub struct SqliteMessageStore {
    db: DatabaseHandle,
}

impl SqliteMessageStore {
    /// Create a new message store. The pool is opened on the first query.
    pub fn new(db: DatabaseHandle) -> Self {
        Self { db }
    }

    pub fn handle(&self) -> &DatabaseHandle {
        &self.db
    }

    /// Count stored messages
    pub async fn count(&self) -> DatabaseResult<i64> {
        let pool = self.db.pool().await?;
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
            .fetch_one(pool)
            .await
            .map_err(DatabaseError::from_query)?;
        Ok(count)
    }

    async fn insert(&self, message: &MessageSnapshot) -> DatabaseResult<()> {
        let pool = self.db.pool().await?;

        sqlx::query(
            "INSERT INTO messages
                 (message_id, room_id, sender_id, message, timestamp_secs, timestamp_nanos, is_read)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&message.message_id)
        .bind(&message.room_id)
        .bind(&message.sender_id)
        .bind(&message.content)
        .bind(message.timestamp.timestamp())
        .bind(message.timestamp.timestamp_subsec_nanos())
        .bind(message.is_read)
        .execute(pool)
        .await
        .map_err(DatabaseError::from_query)?;

        info!(
            message_id = %message.message_id,
            room_id = %message.room_id,
            sender_id = %message.sender_id,
            "inserted message"
        );

        Ok(())
    }

    async fn fetch_all(&self) -> DatabaseResult<Vec<MessageSnapshot>> {
        let pool = self.db.pool().await?;

        let rows = sqlx::query(
            "SELECT message_id, room_id, sender_id, message, timestamp_secs, timestamp_nanos, is_read
             FROM messages ORDER BY timestamp_secs ASC, timestamp_nanos ASC, rowid ASC",
        )
        .fetch_all(pool)
        .await
        .map_err(DatabaseError::from_query)?;

        let messages = rows
            .iter()
            .map(row_to_snapshot)
            .collect::<DatabaseResult<Vec<_>>>()?;

        debug!(count = messages.len(), "listed messages");
        Ok(messages)
    }
}

#[async_trait]
impl MessageStore for SqliteMessageStore {
    async fn create(&self, message: MessageSnapshot) -> MessageResult<()> {
        Ok(self.insert(&message).await?)
    }

    async fn list(&self) -> MessageResult<Vec<MessageSnapshot>> {
        Ok(self.fetch_all().await?)
    }
}

fn row_to_snapshot(row: &SqliteRow) -> DatabaseResult<MessageSnapshot> {
    let column = |e: sqlx::Error| DatabaseError::CorruptRow(e.to_string());

    let secs: i64 = row.try_get("timestamp_secs").map_err(column)?;
    let nanos: i64 = row.try_get("timestamp_nanos").map_err(column)?;
    let timestamp = u32::try_from(nanos)
        .ok()
        .and_then(|nanos| DateTime::<Utc>::from_timestamp(secs, nanos))
        .ok_or_else(|| DatabaseError::CorruptRow(format!("timestamp {secs}s {nanos}ns")))?;

    Ok(MessageSnapshot {
        message_id: row.try_get("message_id").map_err(column)?,
        room_id: row.try_get("room_id").map_err(column)?,
        sender_id: row.try_get("sender_id").map_err(column)?,
        content: row.try_get("message").map_err(column)?,
        timestamp,
        is_read: row.try_get("is_read").map_err(column)?,
    })
}
