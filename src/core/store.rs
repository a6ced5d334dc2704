//! Record store trait and store-level errors
//!
//! Services only need seven primitive operations from a backend. Everything
//! else (uniqueness checks, duplicate detection, owner-scoped listings) is
//! built on top of these in the service layer.

use crate::core::entity::{Entity, RecordId};
use crate::core::filter::Filter;
use async_trait::async_trait;

/// Failures raised by a record store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A store-level unique constraint rejected the write
    #[error("duplicate value for unique field '{field}' in '{collection}'")]
    DuplicateKey { collection: String, field: String },

    /// The backend could not be reached
    #[error("failed to connect to {backend}: {message}")]
    Connection { backend: String, message: String },

    /// A query or write failed on the backend
    #[error("{backend} query error: {message}")]
    Query { backend: String, message: String },

    /// A stored document could not be mapped to or from a record
    #[error("failed to map {collection} document: {message}")]
    Serialization { collection: String, message: String },

    /// The store's internal state is unusable (e.g. poisoned lock)
    #[error("store unavailable: {message}")]
    Unavailable { message: String },
}

/// A specialized Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent collection of records of one entity type
///
/// Identifiers that the backend cannot parse are treated as unknown:
/// lookups return `None`, deletes return `false`.
///
/// Implementations must enforce [`Entity::unique_fields`] on insert and
/// replace, reporting violations as [`StoreError::DuplicateKey`].
#[async_trait]
pub trait RecordStore<T: Entity>: Send + Sync {
    /// Get a record by id
    async fn find_by_id(&self, id: &RecordId) -> StoreResult<Option<T>>;

    /// Get the first record matching the filter
    async fn find_one(&self, filter: &Filter) -> StoreResult<Option<T>>;

    /// Get every record matching the filter, in the filter's sort order
    async fn find_many(&self, filter: &Filter) -> StoreResult<Vec<T>>;

    /// Insert a new record, assigning its id; returns the stored record
    async fn insert_one(&self, record: T) -> StoreResult<T>;

    /// Replace the record with the same id; returns `false` if none matched
    async fn replace_one(&self, record: &T) -> StoreResult<bool>;

    /// Delete a record; returns `true` if a record was removed
    async fn delete_one(&self, id: &RecordId) -> StoreResult<bool>;

    /// Count records matching the filter
    async fn count(&self, filter: &Filter) -> StoreResult<u64>;
}
