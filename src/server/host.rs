//! Server host for transport-agnostic API exposure
//!
//! The host owns the services and the configuration. Exposures (only REST
//! today) consume it to build their routers.

use crate::config::AppConfig;
use crate::server::entity_registry::EntityRegistry;
use crate::server::exposure::rest::{UserDescriptor, WordDescriptor};
use crate::services::{UserService, WordService};
use crate::storage::Stores;
use std::sync::Arc;

/// Host context containing all application state
pub struct ServerHost {
    pub config: Arc<AppConfig>,

    pub users: Arc<UserService>,

    pub words: Arc<WordService>,

    /// Route sets of the exposed collections
    pub entity_registry: EntityRegistry,
}

impl ServerHost {
    /// Wire the services on top of `stores` and register their routes
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let rules = config.validation.clone();

        let mut users = UserService::new(stores.users, rules.clone());
        if config.users.cascade_delete_words {
            users = users.with_word_cascade(stores.words.clone());
        }
        let users = Arc::new(users);
        let words = Arc::new(WordService::new(stores.words, rules));

        let mut entity_registry = EntityRegistry::new();
        entity_registry.register(Box::new(UserDescriptor::new(users.clone())));
        entity_registry.register(Box::new(WordDescriptor::new(words.clone())));

        Self {
            config: Arc::new(config),
            users,
            words,
            entity_registry,
        }
    }

    /// Collections exposed by the host
    pub fn collections(&self) -> Vec<&'static str> {
        self.entity_registry.collections()
    }
}
