//! Mounting of the per-collection route sets

use axum::Router;

/// Routes for one collection of records
pub trait EntityDescriptor: Send + Sync {
    /// Collection name, also the first path segment (`users`, `words`)
    fn collection(&self) -> &'static str;

    /// Routes with absolute paths under `/{collection}`
    fn routes(&self) -> Router;
}

/// Ordered set of descriptors, at most one per collection
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: Vec<Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor; a second one for the same collection is ignored
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let collection = descriptor.collection();
        if self.collections().contains(&collection) {
            tracing::warn!(collection, "collection routes already registered");
            return;
        }
        self.descriptors.push(descriptor);
    }

    /// Registered collections, in registration order
    pub fn collections(&self) -> Vec<&'static str> {
        self.descriptors.iter().map(|d| d.collection()).collect()
    }

    /// Merge every collection's routes into one router
    pub fn router(&self) -> Router {
        self.descriptors
            .iter()
            .fold(Router::new(), |router, d| router.merge(d.routes()))
    }
}
