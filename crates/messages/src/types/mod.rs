//! Shared types for the messages domain.

pub mod errors;

pub use errors::{MessageError, MessageResult};
