use std::time::Duration;

#[cfg(feature = "mongodb")]
use bson::doc;
#[cfg(feature = "mongodb")]
use mongodb::error::Error as MongoError;
#[cfg(feature = "mongodb")]
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
#[cfg(feature = "mongodb")]
use mongodb::{Client, Database};

#[cfg(feature = "mongodb")]
use super::mongo_repo::MongoBlogRepository;

/// Configuration for the document store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// MongoDB connection string.
    pub uri: String,
    pub database: String,
    pub collection: String,
    /// Applies to both connecting and server selection.
    pub connect_timeout: Duration,
    pub app_name: Option<String>,
}

impl DatabaseConfig {
    pub const DEFAULT_DATABASE: &'static str = "blogApp";
    pub const DEFAULT_COLLECTION: &'static str = "blogs";

    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: Self::DEFAULT_DATABASE.to_string(),
            collection: Self::DEFAULT_COLLECTION.to_string(),
            connect_timeout: Duration::from_secs(10),
            app_name: None,
        }
    }
}

/// The process-wide MongoDB client.
///
/// Created once at startup and shared through the application state. The
/// driver pools connections internally, so cloning the handles is cheap.
///
/// # Example
/// ```ignore
/// let conn = DatabaseConnection::init(&config).await?;
/// conn.ping().await?;
/// let blogs = conn.blogs();
/// ```
#[cfg(feature = "mongodb")]
pub struct DatabaseConnection {
    pub client: Client,
    pub database: Database,
    collection: String,
}

#[cfg(feature = "mongodb")]
impl DatabaseConnection {
    /// Build the client. The driver connects lazily, so this only fails on a
    /// malformed connection string or unresolvable SRV record.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, MongoError> {
        tracing::info!("Initializing database connection...");

        let mut options = ClientOptions::parse(config.uri.as_str()).await?;
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.connect_timeout);
        if config.app_name.is_some() {
            options.app_name = config.app_name.clone();
        }

        let client = Client::with_options(options)?;
        let database = client.database(&config.database);
        tracing::info!(
            database = %config.database,
            collection = %config.collection,
            "MongoDB client created"
        );

        Ok(Self {
            client,
            database,
            collection: config.collection.clone(),
        })
    }

    /// Round-trip a `ping` to the deployment.
    pub async fn ping(&self) -> Result<(), MongoError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    /// Repository over the configured blog collection.
    pub fn blogs(&self) -> MongoBlogRepository {
        MongoBlogRepository::new(self.database.clone(), &self.collection)
    }
}
