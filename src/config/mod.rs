//! Configuration loading and management
//!
//! Every section has defaults, so an empty file (or no file at all) yields a
//! runnable in-memory configuration.

use crate::core::validation::ValidationRules;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the config file when no CLI argument is given
pub const CONFIG_ENV_VAR: &str = "POLYGLOTTE_CONFIG";

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub validation: ValidationRules,
    pub users: UsersConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests running longer than this are cancelled
    pub request_timeout_secs: u64,
    /// Origins allowed by CORS; empty allows any origin
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout_secs: 30,
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which record store backs the services
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Mongodb,
}

/// Record store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub connection_string: String,
    pub database: String,
    pub users_collection: String,
    pub words_collection: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::InMemory,
            connection_string: "mongodb://localhost:27017".to_string(),
            database: "polyglotte".to_string(),
            users_collection: "users".to_string(),
            words_collection: "words".to_string(),
        }
    }
}

/// User lifecycle settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersConfig {
    /// Delete a user's words when the user is deleted
    pub cascade_delete_words: bool,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Resolve the config for the binary
    ///
    /// `explicit` (the first CLI argument) wins over [`CONFIG_ENV_VAR`]. With
    /// neither, or when the resolved file does not exist, defaults are used.
    pub fn load(explicit: Option<String>) -> Result<Self> {
        let path = explicit.or_else(|| std::env::var(CONFIG_ENV_VAR).ok());

        match path {
            Some(path) if Path::new(&path).exists() => {
                tracing::info!(path = %path, "loading configuration");
                Self::from_yaml_file(&path)
            }
            Some(path) => {
                tracing::warn!(path = %path, "config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }
}
