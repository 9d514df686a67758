//! Database connection management

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use messages_config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tokio::fs;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::types::{DatabaseError, DatabaseResult};

/// Prepare and establish a database connection pool
pub async fn prepare_database(config: &DatabaseConfig) -> Result<SqlitePool> {
    ensure_sqlite_path(&config.url).await?;

    let options = SqliteConnectOptions::from_str(&config.url)
        .with_context(|| format!("invalid sqlite url {}", config.url))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let mut pool_options = SqlitePoolOptions::new().max_connections(config.max_connections.max(1));

    // an in-memory database disappears with its last connection
    if is_memory_url(&config.url) {
        pool_options = pool_options
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_options
        .connect_with(options)
        .await
        .with_context(|| format!("failed to connect to database {}", config.url))?;

    info!(url = %config.url, "database connection established");
    Ok(pool)
}

fn is_memory_url(url: &str) -> bool {
    sqlite_file_part(url).map_or(false, |path| path == ":memory:")
}

fn sqlite_file_part(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    Some(rest.split('?').next().unwrap_or(rest))
}

/// Ensure the directory holding the SQLite database file exists
async fn ensure_sqlite_path(url: &str) -> Result<()> {
    let Some(sqlite_path) = sqlite_file_part(url) else {
        return Ok(());
    };

    if sqlite_path.is_empty() || sqlite_path == ":memory:" {
        return Ok(());
    }

    let path = Path::new(sqlite_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create sqlite directory {}", parent.display())
            })?;
        }
    }

    Ok(())
}

/// Process-wide shared database handle.
///
/// The pool is opened and migrated the first time [`DatabaseHandle::pool`]
/// is awaited. Concurrent first callers wait on the same initialisation, so
/// exactly one pool exists per handle. Clones share that pool.
#[derive(Clone)]
pub struct DatabaseHandle {
    config: Arc<DatabaseConfig>,
    pool: Arc<OnceCell<SqlitePool>>,
}

impl DatabaseHandle {
    /// Create a handle that connects lazily on first use
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config: Arc::new(config),
            pool: Arc::new(OnceCell::new()),
        }
    }

    /// Get the shared pool, opening and migrating it on first use
    pub async fn pool(&self) -> DatabaseResult<&SqlitePool> {
        self.pool
            .get_or_try_init(|| async {
                debug!(url = %self.config.url, "initialising shared database pool");
                crate::initialize_database(&self.config).await
            })
            .await
    }

    pub fn is_initialized(&self) -> bool {
        self.pool.initialized()
    }

    /// Test the database connection
    pub async fn test_connection(&self) -> DatabaseResult<()> {
        let pool = self.pool().await?;
        sqlx::query("SELECT 1")
            .fetch_one(pool)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;
        Ok(())
    }

    /// Close the pool if it was ever opened
    pub async fn close(&self) {
        if let Some(pool) = self.pool.get() {
            pool.close().await;
            info!("database connection pool closed");
        }
    }
}
