//! # Messages Domain Crate
//!
//! Core of the messages service: the `Message` entity, the `MessageStore`
//! storage contract with an in-memory implementation, and the
//! `MessageService` that ties them together.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::Utc;
//! use messages_domain::{InMemoryMessageStore, MessageService, NewMessage};
//!
//! # async fn demo() -> messages_domain::MessageResult<()> {
//! let service = MessageService::new(Arc::new(InMemoryMessageStore::new()));
//! let message = service
//!     .create_message(NewMessage::new("hi", "room-1", "user-1", Utc::now(), false))
//!     .await?;
//! assert_eq!(service.list_messages().await?, vec![message]);
//! # Ok(())
//! # }
//! ```

pub mod entities;
pub mod repositories;
pub mod services;
pub mod types;

pub use entities::{Message, MessageSnapshot, NewMessage};
pub use repositories::{InMemoryMessageStore, MessageStore};
pub use services::MessageService;
pub use types::{MessageError, MessageResult};
