//! Integration tests for MongoRecordStore using the storage test harness.
//!
//! # Requirements
//!
//! - Docker must be running (testcontainers launches a MongoDB container)
//! - Feature flag `mongodb_backend` must be enabled
//!
//! # Running
//!
//! ```sh
//! cargo test --features mongodb_backend --test mongodb_tests
//! ```
//!
//! # Test isolation
//!
//! All tests share a single MongoDB container. Each store factory call opens
//! a fresh database, so tests can run in parallel.

#![cfg(feature = "mongodb_backend")]

#[macro_use]
mod storage_harness;

use mongodb::Client;
use polyglotte::entities::{User, Word};
use polyglotte::storage::MongoRecordStore;
use std::sync::atomic::{AtomicU64, Ordering};
use storage_harness::*;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::mongo::Mongo;
use tokio::sync::OnceCell;

// ---------------------------------------------------------------------------
// Shared test environment (single container, fresh database per store)
// ---------------------------------------------------------------------------

/// Holds the testcontainer handle (keeps it alive) and the connection URL.
struct MongoTestEnv {
    /// Container handle; dropping this stops the MongoDB container.
    _container: testcontainers::ContainerAsync<Mongo>,
    connection_url: String,
}

/// Global test environment, initialized once per test binary.
static TEST_ENV: OnceCell<MongoTestEnv> = OnceCell::const_new();

async fn init_mongo_env() -> &'static MongoTestEnv {
    TEST_ENV
        .get_or_init(|| async {
            let container = Mongo::default()
                .start()
                .await
                .expect("Failed to start MongoDB container; is Docker running?");

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(27017).await.unwrap();

            MongoTestEnv {
                _container: container,
                connection_url: format!("mongodb://{}:{}", host, port),
            }
        })
        .await
}

/// Atomic counter to generate unique database names per store.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

async fn mongo_database() -> mongodb::Database {
    let env = init_mongo_env().await;
    let client = Client::with_uri_str(&env.connection_url)
        .await
        .expect("Failed to connect to MongoDB");
    let db_num = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    client.database(&format!("polyglotte_test_{}", db_num))
}

// ---------------------------------------------------------------------------
// Factory helpers
// ---------------------------------------------------------------------------

async fn clean_user_store() -> MongoRecordStore<User> {
    let store = MongoRecordStore::<User>::new(mongo_database().await, "users");
    store
        .ensure_indexes()
        .await
        .expect("Failed to create unique indexes");
    store
}

async fn clean_word_store() -> MongoRecordStore<Word> {
    MongoRecordStore::<Word>::new(mongo_database().await, "words")
}

// ---------------------------------------------------------------------------
// Test suites via macros
// ---------------------------------------------------------------------------

record_store_tests!(clean_user_store().await, clean_word_store().await);
