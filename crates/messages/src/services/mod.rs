//! Business logic services for messages.

pub mod message_service;

pub use message_service::MessageService;
