//! Shared application state for the gateway

use std::sync::Arc;

use messages_domain::{InMemoryMessageStore, MessageService, MessageStore};

/// Shared application state containing all services
#[derive(Clone)]
pub struct GatewayState {
    /// Message service
    message_service: Arc<MessageService>,
}

impl GatewayState {
    /// Create a new gateway state on top of the given store
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self {
            message_service: Arc::new(MessageService::new(store)),
        }
    }

    /// State backed by a fresh in-memory store, for development and tests
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryMessageStore::new()))
    }

    /// Get a message service reference
    pub fn message_service(&self) -> &MessageService {
        &self.message_service
    }
}
