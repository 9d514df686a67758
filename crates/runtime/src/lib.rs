use std::sync::Arc;

use anyhow::{Context, Result};
use messages_config::{AppConfig, StorageBackend};
use messages_database::{DatabaseHandle, SqliteMessageStore};
use messages_domain::{InMemoryMessageStore, MessageStore};
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::TRACE)
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// Storage selected by the configuration, shared by every request
#[derive(Clone)]
pub struct BackendServices {
    /// Present when the SQLite backend is selected
    pub database: Option<DatabaseHandle>,
    pub store: Arc<dyn MessageStore>,
}

impl BackendServices {
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        match config.storage.backend {
            StorageBackend::Memory => {
                info!(backend = config.storage.backend.as_str(), "message store ready");
                Ok(Self {
                    database: None,
                    store: Arc::new(InMemoryMessageStore::new()),
                })
            }
            StorageBackend::Sqlite => {
                let database = DatabaseHandle::new(config.database.clone());

                if config.database.connect_on_startup {
                    database
                        .test_connection()
                        .await
                        .with_context(|| format!("failed to open database {}", config.database.url))?;
                } else {
                    info!(url = %config.database.url, "database will be opened on first use");
                }

                info!(backend = config.storage.backend.as_str(), "message store ready");
                Ok(Self {
                    store: Arc::new(SqliteMessageStore::new(database.clone())),
                    database: Some(database),
                })
            }
        }
    }

    /// Fail unless messages written now outlive the process
    pub fn ensure_persistent(&self, command: &str) -> Result<()> {
        if self.database.is_none() {
            anyhow::bail!(
                "`{command}` needs a persistent store; the memory backend is discarded on exit \
                 (set storage.backend = \"sqlite\")"
            );
        }
        Ok(())
    }

    /// Release the database pool, if one was opened
    pub async fn shutdown(&self) {
        if let Some(database) = &self.database {
            database.close().await;
        }
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
