//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::BlogRepository;
use blog_infra::database::InMemoryBlogRepository;

#[cfg(feature = "mongodb")]
use blog_infra::database::DatabaseConnection;

use crate::config::AppConfig;

/// Shared application state.
///
/// The store handle is created once at startup and injected here; handlers
/// never reach for a global client.
#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<dyn BlogRepository>,
    pub comment_upsert: bool,
}

impl AppState {
    pub fn with_repository(blogs: Arc<dyn BlogRepository>, comment_upsert: bool) -> Self {
        Self {
            blogs,
            comment_upsert,
        }
    }

    /// Build the application state with the store the configuration asks for.
    ///
    /// A malformed connection string is fatal. An unreachable deployment is
    /// only logged: the server still starts and store calls fail per request.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        #[cfg(feature = "mongodb")]
        let blogs: Arc<dyn BlogRepository> = match &config.database {
            Some(db_config) => {
                let conn = DatabaseConnection::init(db_config).await?;
                match conn.ping().await {
                    Ok(()) => tracing::info!("Pinged your deployment. MongoDB connection is up."),
                    Err(e) => tracing::error!(error = %e, "Failed to ping MongoDB deployment"),
                }
                Arc::new(conn.blogs())
            }
            None => {
                tracing::warn!("DB_URI not set. Running without database (in-memory mode).");
                Arc::new(InMemoryBlogRepository::new())
            }
        };

        #[cfg(not(feature = "mongodb"))]
        let blogs: Arc<dyn BlogRepository> = {
            if config.database.is_some() {
                tracing::warn!("DB_URI ignored: built without the mongodb feature");
            }
            tracing::info!("Running without mongodb feature - using in-memory repository");
            Arc::new(InMemoryBlogRepository::new())
        };

        tracing::info!(
            comment_upsert = config.comment_upsert,
            "Application state initialized"
        );

        Ok(Self::with_repository(blogs, config.comment_upsert))
    }
}
