//! In-memory record store for tests and development

use crate::core::entity::{Entity, RecordId};
use crate::core::filter::Filter;
use crate::core::store::{RecordStore, StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory store implementation
///
/// Ids are random UUIDs. Unique fields are checked under the write lock, so
/// two concurrent inserts of the same username cannot both succeed. Without
/// a sort, results come back in insertion order.
#[derive(Clone)]
pub struct InMemoryRecordStore<T> {
    /// Records keyed by id, each tagged with its insertion sequence number
    records: Arc<RwLock<HashMap<RecordId, (u64, T)>>>,
    sequence: Arc<AtomicU64>,
}

impl<T> InMemoryRecordStore<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl<T> Default for InMemoryRecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> InMemoryRecordStore<T> {
    fn to_value(record: &T) -> StoreResult<Value> {
        serde_json::to_value(record).map_err(|e| StoreError::Serialization {
            collection: T::resource_name().to_string(),
            message: e.to_string(),
        })
    }

    fn lock_error(e: impl std::fmt::Display) -> StoreError {
        StoreError::Unavailable {
            message: format!("failed to acquire lock on {}: {}", T::resource_name(), e),
        }
    }

    /// Reject `candidate` if another record holds one of its unique values
    fn check_unique(records: &HashMap<RecordId, (u64, T)>, candidate: &T) -> StoreResult<()> {
        if T::unique_fields().is_empty() {
            return Ok(());
        }

        let candidate_value = Self::to_value(candidate)?;
        for (_, other) in records.values().filter(|(_, r)| r.id() != candidate.id()) {
            let other_value = Self::to_value(other)?;
            for field in T::unique_fields() {
                if candidate_value.get(field).is_some()
                    && candidate_value.get(field) == other_value.get(field)
                {
                    return Err(StoreError::DuplicateKey {
                        collection: T::resource_name().to_string(),
                        field: field.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Records matching `filter`, sorted by the filter or by insertion order
    fn select(&self, filter: &Filter) -> StoreResult<Vec<T>> {
        let records = self.records.read().map_err(Self::lock_error)?;

        let mut matched = Vec::new();
        for (seq, record) in records.values() {
            let value = Self::to_value(record)?;
            if filter.matches(&value) {
                matched.push((*seq, value, record.clone()));
            }
        }

        // Stable sort: ties on the sort field keep insertion order
        matched.sort_by_key(|(seq, _, _)| *seq);
        if filter.sort().is_some() {
            matched.sort_by(|(_, a, _), (_, b, _)| filter.compare(a, b));
        }

        Ok(matched.into_iter().map(|(_, _, record)| record).collect())
    }
}

#[async_trait]
impl<T: Entity> RecordStore<T> for InMemoryRecordStore<T> {
    async fn find_by_id(&self, id: &RecordId) -> StoreResult<Option<T>> {
        let records = self.records.read().map_err(Self::lock_error)?;
        Ok(records.get(id).map(|(_, record)| record.clone()))
    }

    async fn find_one(&self, filter: &Filter) -> StoreResult<Option<T>> {
        Ok(self.select(filter)?.into_iter().next())
    }

    async fn find_many(&self, filter: &Filter) -> StoreResult<Vec<T>> {
        self.select(filter)
    }

    async fn insert_one(&self, mut record: T) -> StoreResult<T> {
        let mut records = self.records.write().map_err(Self::lock_error)?;

        record.assign_id(RecordId::new(Uuid::new_v4().to_string()));
        Self::check_unique(&records, &record)?;

        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        records.insert(record.id().clone(), (seq, record.clone()));
        Ok(record)
    }

    async fn replace_one(&self, record: &T) -> StoreResult<bool> {
        let mut records = self.records.write().map_err(Self::lock_error)?;

        let Some(seq) = records.get(record.id()).map(|(seq, _)| *seq) else {
            return Ok(false);
        };
        Self::check_unique(&records, record)?;

        records.insert(record.id().clone(), (seq, record.clone()));
        Ok(true)
    }

    async fn delete_one(&self, id: &RecordId) -> StoreResult<bool> {
        let mut records = self.records.write().map_err(Self::lock_error)?;
        Ok(records.remove(id).is_some())
    }

    async fn count(&self, filter: &Filter) -> StoreResult<u64> {
        Ok(self.select(filter)?.len() as u64)
    }
}
