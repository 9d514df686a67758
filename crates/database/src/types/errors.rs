//! Error types for the database layer

use messages_domain::MessageError;
use thiserror::Error;

/// General database error
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database query error: {0}")]
    QueryError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

impl DatabaseError {
    /// Classify a failed statement, keeping unique-key violations apart
    pub fn from_query(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                DatabaseError::Duplicate(db_error.message().to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                DatabaseError::ConnectionError(error.to_string())
            }
            _ => DatabaseError::QueryError(error.to_string()),
        }
    }
}

impl From<DatabaseError> for MessageError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Duplicate(detail) => {
                MessageError::storage(format!("constraint violation: {detail}"))
            }
            other => MessageError::storage(other.to_string()),
        }
    }
}
