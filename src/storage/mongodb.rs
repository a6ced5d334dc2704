//! MongoDB record store using the official MongoDB async driver.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag.
//!
//! # Storage model
//!
//! One collection per entity type. Ids are ObjectIds stored in `_id` and
//! exposed as their hex string; `createdAt` is stored as a BSON datetime so
//! the `(userId, createdAt)` index orders chronologically. BSON datetimes
//! have millisecond precision.
//!
//! # Serialization strategy
//!
//! Records are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents, renaming `id` to `_id` and converting
//! timestamps on the way in and out.

use crate::core::entity::{Entity, RecordId};
use crate::core::filter::{Filter, SortDirection};
use crate::core::store::{RecordStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

const BACKEND: &str = "mongodb";

/// Server error code for unique index violations
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Fields persisted as BSON datetimes
const DATETIME_FIELDS: &[&str] = &["createdAt"];

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

fn query_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::Query {
        backend: BACKEND.to_string(),
        message: e.to_string(),
    }
}

/// Convert a JSON object into a BSON document: `id` → `_id` (ObjectId),
/// RFC 3339 timestamps → BSON datetimes.
fn json_to_document(collection: &str, json: serde_json::Value) -> StoreResult<Document> {
    let mapping_error = |message: String| StoreError::Serialization {
        collection: collection.to_string(),
        message,
    };

    let mut doc = match bson::to_bson(&json).map_err(|e| mapping_error(e.to_string()))? {
        Bson::Document(d) => d,
        _ => return Err(mapping_error("expected a document".to_string())),
    };

    if let Some(Bson::String(id)) = doc.remove("id")
        && !id.is_empty()
    {
        let oid = ObjectId::parse_str(&id).map_err(|e| mapping_error(e.to_string()))?;
        doc.insert("_id", oid);
    }

    for field in DATETIME_FIELDS {
        if let Ok(raw) = doc.get_str(field) {
            let parsed = raw
                .parse::<DateTime<Utc>>()
                .map_err(|e| mapping_error(format!("{}: {}", field, e)))?;
            doc.insert(
                *field,
                bson::DateTime::from_millis(parsed.timestamp_millis()),
            );
        }
    }

    Ok(doc)
}

/// Convert a BSON document back into JSON: `_id` → `id` (hex string),
/// BSON datetimes → RFC 3339 strings.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        let id = match id {
            Bson::ObjectId(oid) => Bson::String(oid.to_hex()),
            other => other,
        };
        doc.insert("id", id);
    }

    for field in DATETIME_FIELDS {
        if let Ok(dt) = doc.get_datetime(field)
            && let Some(parsed) = DateTime::<Utc>::from_timestamp_millis(dt.timestamp_millis())
        {
            doc.insert(*field, parsed.to_rfc3339());
        }
    }

    Bson::Document(doc).into_relaxed_extjson()
}

fn filter_document(filter: &Filter) -> Document {
    let mut query = Document::new();
    for (field, value) in filter.conditions() {
        query.insert(field.as_str(), value.as_str());
    }
    query
}

// ---------------------------------------------------------------------------
// MongoRecordStore<T>
// ---------------------------------------------------------------------------

/// Record store backed by one MongoDB collection
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use polyglotte::storage::MongoRecordStore;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let users = MongoRecordStore::<User>::new(client.database("polyglotte"), "users");
/// users.ensure_indexes().await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoRecordStore<T> {
    collection: Collection<Document>,
    _marker: std::marker::PhantomData<T>,
}

impl<T: Entity> MongoRecordStore<T> {
    pub fn new(database: Database, collection_name: &str) -> Self {
        Self {
            collection: database.collection(collection_name),
            _marker: std::marker::PhantomData,
        }
    }

    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    /// Create a unique index for each of `T::unique_fields()`
    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        for field in T::unique_fields() {
            let mut keys = Document::new();
            keys.insert(*field, 1);
            let model = IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(true).build())
                .build();
            self.collection
                .create_index(model)
                .await
                .map_err(query_error)?;
        }
        Ok(())
    }

    /// Create a secondary (non-unique) index
    pub async fn create_index(&self, keys: Document) -> StoreResult<()> {
        self.collection
            .create_index(IndexModel::builder().keys(keys).build())
            .await
            .map_err(query_error)?;
        Ok(())
    }

    fn to_document(&self, record: &T) -> StoreResult<Document> {
        let json = serde_json::to_value(record).map_err(|e| StoreError::Serialization {
            collection: self.collection_name().to_string(),
            message: e.to_string(),
        })?;
        json_to_document(self.collection_name(), json)
    }

    fn from_document(&self, doc: Document) -> StoreResult<T> {
        serde_json::from_value(document_to_json(doc)).map_err(|e| StoreError::Serialization {
            collection: self.collection_name().to_string(),
            message: e.to_string(),
        })
    }

    /// Translate a unique index violation into [`StoreError::DuplicateKey`]
    fn write_error(&self, err: mongodb::error::Error) -> StoreError {
        if let ErrorKind::Write(WriteFailure::WriteError(write)) = err.kind.as_ref()
            && write.code == DUPLICATE_KEY_CODE
        {
            // The server message names the index, e.g. `index: email_1 dup key: ...`
            let field = T::unique_fields()
                .iter()
                .find(|f| write.message.contains(&format!("{}_1", f)))
                .map(|f| f.to_string())
                .unwrap_or_else(|| "_id".to_string());
            return StoreError::DuplicateKey {
                collection: self.collection_name().to_string(),
                field,
            };
        }
        query_error(err)
    }
}

#[async_trait]
impl<T: Entity> RecordStore<T> for MongoRecordStore<T> {
    async fn find_by_id(&self, id: &RecordId) -> StoreResult<Option<T>> {
        let Ok(oid) = ObjectId::parse_str(id.as_str()) else {
            return Ok(None);
        };

        let doc = self
            .collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(query_error)?;

        doc.map(|d| self.from_document(d)).transpose()
    }

    async fn find_one(&self, filter: &Filter) -> StoreResult<Option<T>> {
        let doc = self
            .collection
            .find_one(filter_document(filter))
            .await
            .map_err(query_error)?;

        doc.map(|d| self.from_document(d)).transpose()
    }

    async fn find_many(&self, filter: &Filter) -> StoreResult<Vec<T>> {
        let mut find = self.collection.find(filter_document(filter));
        if let Some(sort) = filter.sort() {
            let direction = match sort.direction {
                SortDirection::Ascending => 1,
                SortDirection::Descending => -1,
            };
            let mut order = Document::new();
            order.insert(sort.field.as_str(), direction);
            find = find.sort(order);
        }

        let docs: Vec<Document> = find
            .await
            .map_err(query_error)?
            .try_collect()
            .await
            .map_err(query_error)?;

        docs.into_iter().map(|d| self.from_document(d)).collect()
    }

    /// Returns the record as stored, i.e. with `createdAt` at millisecond
    /// precision
    async fn insert_one(&self, mut record: T) -> StoreResult<T> {
        record.assign_id(RecordId::new(ObjectId::new().to_hex()));
        let doc = self.to_document(&record)?;

        self.collection
            .insert_one(&doc)
            .await
            .map_err(|e| self.write_error(e))?;

        self.from_document(doc)
    }

    async fn replace_one(&self, record: &T) -> StoreResult<bool> {
        let Ok(oid) = ObjectId::parse_str(record.id().as_str()) else {
            return Ok(false);
        };
        let doc = self.to_document(record)?;

        let result = self
            .collection
            .replace_one(doc! { "_id": oid }, doc)
            .await
            .map_err(|e| self.write_error(e))?;

        Ok(result.matched_count > 0)
    }

    async fn delete_one(&self, id: &RecordId) -> StoreResult<bool> {
        let Ok(oid) = ObjectId::parse_str(id.as_str()) else {
            return Ok(false);
        };

        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(query_error)?;

        Ok(result.deleted_count > 0)
    }

    async fn count(&self, filter: &Filter) -> StoreResult<u64> {
        self.collection
            .count_documents(filter_document(filter))
            .await
            .map_err(query_error)
    }
}
