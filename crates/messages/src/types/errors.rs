//! Error types for the messages domain.

use thiserror::Error;

/// Result type alias for message operations
pub type MessageResult<T> = Result<T, MessageError>;

/// Main error type for the messages domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// A required field is missing or malformed at construction time.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The persistence medium could not complete a create or list.
    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl MessageError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }
}
