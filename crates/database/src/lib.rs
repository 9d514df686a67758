//! Messages Database Crate
//!
//! SQLite persistence for the messages service: connection management,
//! the shared lazily-initialised [`DatabaseHandle`], migrations, and the
//! [`SqliteMessageStore`] implementation of the storage contract.

use messages_config::DatabaseConfig;
use sqlx::SqlitePool;

pub mod connection;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::{prepare_database, DatabaseHandle};
pub use migrations::run_migrations;
pub use repos::SqliteMessageStore;
pub use types::{DatabaseError, DatabaseResult};

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn create_test_database() -> (SqlitePool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 1,
            connect_on_startup: true,
        };

        let pool = initialize_database(&config).await.unwrap();
        (pool, temp_dir)
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let (pool, _temp_dir) = create_test_database().await;

        let result: (bool,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert!(result.0);
    }

    #[tokio::test]
    async fn test_wal_mode_enabled() {
        let (pool, _temp_dir) = create_test_database().await;

        let (mode,): (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(mode.to_lowercase(), "wal");
    }
}
