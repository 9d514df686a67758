//! Data access layer for messages.
//!
//! `MessageStore` is the contract; the SQLite implementation lives in the
//! database crate, the in-memory one here.

pub mod memory_repository;
pub mod message_repository;

pub use memory_repository::InMemoryMessageStore;
pub use message_repository::MessageStore;

#[cfg(test)]
pub use message_repository::MockMessageStore;
