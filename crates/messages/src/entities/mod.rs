//! Domain entities for the messages service.
//!
//! Pure value objects without storage or transport concerns.

pub mod message;

pub use message::{Message, MessageSnapshot, NewMessage};
