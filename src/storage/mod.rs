//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use in_memory::InMemoryRecordStore;
#[cfg(feature = "mongodb_backend")]
pub use mongodb::MongoRecordStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::core::store::RecordStore;
use crate::entities::{User, Word};
use anyhow::Result;
use std::sync::Arc;

/// The two collections the services run on
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn RecordStore<User>>,
    pub words: Arc<dyn RecordStore<Word>>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryRecordStore::<User>::new()),
            words: Arc::new(InMemoryRecordStore::<Word>::new()),
        }
    }

    /// Open the backend selected in the configuration
    pub async fn connect(config: &StorageConfig) -> Result<Self> {
        match config.backend {
            StorageBackend::InMemory => {
                tracing::info!("using in-memory record stores");
                Ok(Self::in_memory())
            }
            StorageBackend::Mongodb => Self::connect_mongodb(config).await,
        }
    }

    #[cfg(feature = "mongodb_backend")]
    async fn connect_mongodb(config: &StorageConfig) -> Result<Self> {
        use ::mongodb::Client;
        use ::mongodb::bson::doc;
        use anyhow::Context;

        let client = Client::with_uri_str(&config.connection_string)
            .await
            .context("failed to connect to MongoDB")?;
        let database = client.database(&config.database);

        let users = MongoRecordStore::<User>::new(database.clone(), &config.users_collection);
        users.ensure_indexes().await?;

        let words = MongoRecordStore::<Word>::new(database, &config.words_collection);
        words.create_index(doc! { "userId": 1 }).await?;
        words
            .create_index(doc! { "userId": 1, "createdAt": -1 })
            .await?;

        tracing::info!(
            database = %config.database,
            users = %config.users_collection,
            words = %config.words_collection,
            "using MongoDB record stores"
        );

        Ok(Self {
            users: Arc::new(users),
            words: Arc::new(words),
        })
    }

    #[cfg(not(feature = "mongodb_backend"))]
    async fn connect_mongodb(_config: &StorageConfig) -> Result<Self> {
        anyhow::bail!("the mongodb backend requires building with the `mongodb_backend` feature")
    }
}
