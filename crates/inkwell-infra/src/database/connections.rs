use std::sync::Arc;
#[cfg(any(feature = "relational", feature = "document"))]
use std::time::Duration;

use inkwell_core::error::RepoError;
use inkwell_core::ports::{PostRepository, StorageBackend};

use super::memory::InMemoryPostRepository;

#[cfg(feature = "relational")]
use super::relational::{SqlPostRepository, map_db_err};
#[cfg(feature = "relational")]
use sea_orm::{ConnectOptions, Database};

#[cfg(feature = "document")]
use super::document::{MongoPostRepository, map_mongo_err};
#[cfg(feature = "document")]
use mongodb::{Client, bson::doc, options::ClientOptions};

/// Database used by the document store when neither the URL nor the
/// configuration names one.
pub const DEFAULT_DOCUMENT_DATABASE: &str = "blog";

/// Configuration for the backing store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Document store database name override.
    pub document_database: Option<String>,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 100,
            min_connections: 10,
            document_database: None,
        }
    }

    /// Pick the store kind from the URL scheme.
    pub fn backend(&self) -> StorageBackend {
        if self.url.starts_with("mongodb://") || self.url.starts_with("mongodb+srv://") {
            StorageBackend::Document
        } else {
            StorageBackend::Relational
        }
    }

    /// Every connection to an in-memory SQLite database sees its own empty
    /// database, so such URLs are pinned to a single connection.
    fn is_sqlite_memory(&self) -> bool {
        self.url.starts_with("sqlite:") && self.url.contains(":memory:")
    }
}

enum StoreConnection {
    Memory,
    #[cfg(feature = "relational")]
    Relational(Arc<SqlPostRepository>),
    #[cfg(feature = "document")]
    Document(Client),
}

/// The process-wide store: the active post repository plus the connection
/// that backs it.
///
/// Opened once at startup and released with [`Storage::close`] at shutdown.
pub struct Storage {
    posts: Arc<dyn PostRepository>,
    connection: StoreConnection,
}

impl Storage {
    /// Open the configured store, or an in-memory one when none is configured.
    pub async fn open(config: Option<&DatabaseConfig>) -> Result<Self, RepoError> {
        let Some(config) = config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok(Self::in_memory());
        };

        tracing::info!(backend = %config.backend(), "Initializing store connection...");
        match config.backend() {
            StorageBackend::Document => Self::open_document(config).await,
            _ => Self::open_relational(config).await,
        }
    }

    /// A fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            connection: StoreConnection::Memory,
        }
    }

    /// The post repository handlers talk to.
    pub fn posts(&self) -> Arc<dyn PostRepository> {
        Arc::clone(&self.posts)
    }

    pub fn backend(&self) -> StorageBackend {
        self.posts.backend()
    }

    /// Release the underlying connection.
    pub async fn close(self) -> Result<(), RepoError> {
        match self.connection {
            StoreConnection::Memory => {}
            #[cfg(feature = "relational")]
            StoreConnection::Relational(repo) => repo.close().await?,
            #[cfg(feature = "document")]
            StoreConnection::Document(client) => client.shutdown().await,
        }

        tracing::info!("Store connection closed");
        Ok(())
    }

    #[cfg(feature = "relational")]
    async fn open_relational(config: &DatabaseConfig) -> Result<Self, RepoError> {
        let (max, min) = if config.is_sqlite_memory() {
            (1, 1)
        } else {
            (config.max_connections, config.min_connections)
        };

        let opts = ConnectOptions::new(&config.url)
            .max_connections(max)
            .min_connections(min)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false)
            .to_owned();

        let db = Database::connect(opts).await.map_err(map_db_err)?;
        tracing::info!("Relational database connected (pool: {})", max);

        let repo = Arc::new(SqlPostRepository::new(db));
        repo.ensure_schema().await?;

        Ok(Self {
            posts: repo.clone(),
            connection: StoreConnection::Relational(repo),
        })
    }

    #[cfg(not(feature = "relational"))]
    async fn open_relational(_config: &DatabaseConfig) -> Result<Self, RepoError> {
        Err(RepoError::Connection(
            "relational store requested but the `relational` feature is disabled".to_string(),
        ))
    }

    #[cfg(feature = "document")]
    async fn open_document(config: &DatabaseConfig) -> Result<Self, RepoError> {
        let mut options = ClientOptions::parse(&config.url)
            .await
            .map_err(map_mongo_err)?;
        options.max_pool_size = Some(config.max_connections);
        options.min_pool_size = Some(config.min_connections);
        options.connect_timeout = Some(Duration::from_secs(10));
        options.max_idle_time = Some(Duration::from_secs(300));

        let name = config
            .document_database
            .clone()
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DOCUMENT_DATABASE.to_string());

        let client = Client::with_options(options).map_err(map_mongo_err)?;
        let database = client.database(&name);

        // The driver connects lazily; ping so a bad URL fails at startup.
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(map_mongo_err)?;
        tracing::info!(database = %name, "Document store connected");

        Ok(Self {
            posts: Arc::new(MongoPostRepository::new(&database)),
            connection: StoreConnection::Document(client),
        })
    }

    #[cfg(not(feature = "document"))]
    async fn open_document(_config: &DatabaseConfig) -> Result<Self, RepoError> {
        Err(RepoError::Connection(
            "document store requested but the `document` feature is disabled".to_string(),
        ))
    }
}
