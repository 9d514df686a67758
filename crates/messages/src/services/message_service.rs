//! Message service for managing message operations.

use std::sync::Arc;

use tracing::{info, warn};

use crate::entities::{Message, MessageSnapshot, NewMessage};
use crate::repositories::MessageStore;
use crate::types::MessageResult;

/// Service for managing message operations
#[derive(Clone)]
pub struct MessageService {
    store: Arc<dyn MessageStore>,
}

impl MessageService {
    /// Create a new message service on top of any store implementation
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// Build a message from raw input, persist it and hand back its snapshot
    pub async fn create_message(&self, input: NewMessage) -> MessageResult<MessageSnapshot> {
        let message = Message::create(input)?;
        let snapshot = message.into_snapshot();

        if let Err(error) = self.store.create(snapshot.clone()).await {
            warn!(message_id = %snapshot.message_id, %error, "failed to store message");
            return Err(error);
        }

        info!(
            message_id = %snapshot.message_id,
            room_id = %snapshot.room_id,
            sender_id = %snapshot.sender_id,
            "created new message"
        );

        Ok(snapshot)
    }

    /// All stored messages
    pub async fn list_messages(&self) -> MessageResult<Vec<MessageSnapshot>> {
        self.store.list().await
    }

    /// Messages of a single room, filtered after listing the whole store
    pub async fn list_room_messages(&self, room_id: &str) -> MessageResult<Vec<MessageSnapshot>> {
        let messages = self.store.list().await?;
        Ok(messages
            .into_iter()
            .filter(|message| message.room_id == room_id)
            .collect())
    }
}
