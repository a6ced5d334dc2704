//! # Polyglotte
//!
//! REST backend for a personal vocabulary-learning application. Users keep a
//! list of english/french word pairs; the server validates every record and
//! enforces uniqueness before anything reaches the store.
//!
//! ## Features
//!
//! - **Users**: unique username and email, Argon2id password hashes, a
//!   credential check endpoint (no sessions or tokens)
//! - **Words**: per-owner pairs, case-insensitive duplicate avoidance, an
//!   advisory duplicate check for clients
//! - **Pluggable storage**: in-memory store by default, MongoDB behind the
//!   `mongodb_backend` feature
//! - **Configuration-Based**: YAML file with defaults for every setting
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use polyglotte::prelude::*;
//!
//! let config = AppConfig::load(std::env::args().nth(1))?;
//! let stores = Stores::connect(&config.storage).await?;
//!
//! ServerBuilder::new(config).with_stores(stores).serve().await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod services;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        entity::{Entity, RecordId},
        error::{AppError, AppResult, EntityError, RequestError, ValidationError},
        filter::{Filter, SortDirection},
        store::{RecordStore, StoreError, StoreResult},
        validation::{ApiJson, PasswordPolicy, ValidationRules},
    };

    // === Entities ===
    pub use crate::entities::{
        Credentials, NewUser, NewWord, User, UserPatch, UserResponse, Word, WordPatch,
    };

    // === Services ===
    pub use crate::services::{UserService, WordService};

    // === Storage ===
    pub use crate::storage::{InMemoryRecordStore, Stores};
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoRecordStore;

    // === Config ===
    pub use crate::config::{AppConfig, ServerConfig, StorageBackend, StorageConfig, UsersConfig};

    // === Server ===
    pub use crate::server::{EntityDescriptor, EntityRegistry, RestExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
