use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{MessageError, MessageResult};

/// Plain-data view of a message, as stored and as sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSnapshot {
    /// Globally unique identifier
    pub message_id: String,
    /// Room the message was posted to
    pub room_id: String,
    /// Author of the message
    pub sender_id: String,
    /// Message body
    #[serde(rename = "message")]
    pub content: String,
    /// When the message was written
    pub timestamp: DateTime<Utc>,
    /// Read flag as supplied by the caller
    pub is_read: bool,
}

/// Input for [`Message::create`]. Every field except the id is mandatory.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub content: String,
    pub room_id: String,
    pub sender_id: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
    /// Explicit identifier; a UUID v4 is generated when absent
    pub message_id: Option<String>,
}

impl NewMessage {
    pub fn new(
        content: impl Into<String>,
        room_id: impl Into<String>,
        sender_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        is_read: bool,
    ) -> Self {
        Self {
            content: content.into(),
            room_id: room_id.into(),
            sender_id: sender_id.into(),
            timestamp,
            is_read,
            message_id: None,
        }
    }

    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    /// Validate the create input
    pub fn validate(&self) -> MessageResult<()> {
        if self.room_id.trim().is_empty() {
            return Err(MessageError::validation("roomId cannot be empty"));
        }

        if self.sender_id.trim().is_empty() {
            return Err(MessageError::validation("senderId cannot be empty"));
        }

        if let Some(ref message_id) = self.message_id {
            if message_id.trim().is_empty() {
                return Err(MessageError::validation("messageId cannot be blank when supplied"));
            }
        }

        Ok(())
    }
}

/// An immutable chat message.
///
/// Built through [`Message::create`]; the only way to read it back is a
/// [`MessageSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    inner: MessageSnapshot,
}

impl Message {
    /// Create a new message, generating an identifier if none was supplied
    pub fn create(input: NewMessage) -> MessageResult<Self> {
        input.validate()?;

        let NewMessage {
            content,
            room_id,
            sender_id,
            timestamp,
            is_read,
            message_id,
        } = input;

        Ok(Self {
            inner: MessageSnapshot {
                message_id: message_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                room_id,
                sender_id,
                content,
                timestamp,
                is_read,
            },
        })
    }

    pub fn message_id(&self) -> &str {
        &self.inner.message_id
    }

    /// Copy of every field, exactly as set at construction
    pub fn to_snapshot(&self) -> MessageSnapshot {
        self.inner.clone()
    }

    pub fn into_snapshot(self) -> MessageSnapshot {
        self.inner
    }
}

impl From<Message> for MessageSnapshot {
    fn from(message: Message) -> Self {
        message.into_snapshot()
    }
}
