//! In-memory message store for tests and local development.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::MessageStore;
use crate::entities::MessageSnapshot;
use crate::types::{MessageError, MessageResult};

/// Append-only message store held in process memory.
///
/// Writes are visible to the next `list` immediately. Clones share the same
/// underlying collection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageStore {
    messages: Arc<RwLock<Vec<MessageSnapshot>>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn create(&self, message: MessageSnapshot) -> MessageResult<()> {
        let mut messages = self.messages.write().await;

        if messages
            .iter()
            .any(|existing| existing.message_id == message.message_id)
        {
            return Err(MessageError::storage(format!(
                "constraint violation: message {} already exists",
                message.message_id
            )));
        }

        debug!(message_id = %message.message_id, room_id = %message.room_id, "stored message in memory");
        messages.push(message);
        Ok(())
    }

    async fn list(&self) -> MessageResult<Vec<MessageSnapshot>> {
        Ok(self.messages.read().await.clone())
    }
}
