//! Entity traits defining the core abstraction for stored records

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned by a record store on insertion.
///
/// The identifier is carried as a string so that each backend can use its
/// native format (UUIDs in memory, ObjectIds in MongoDB). A record that has
/// not been stored yet carries an empty id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an identifier produced by a store.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a caller-supplied identifier.
    ///
    /// Blank input yields `None`: callers treat it as "nothing to find"
    /// rather than as an error.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Whether a store has assigned this id yet.
    pub fn is_assigned(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Current time rounded up to the next whole millisecond
///
/// Stores keep millisecond precision at best; rounding up keeps a stored
/// `createdAt` from reading earlier than the instant the record was built.
pub fn creation_timestamp() -> DateTime<Utc> {
    let now = Utc::now();
    now.duration_round_up(TimeDelta::milliseconds(1))
        .unwrap_or(now)
}

/// Base trait for all records kept in a [`RecordStore`](crate::core::store::RecordStore).
///
/// All entities have:
/// - id: Store-assigned identifier
/// - created_at: Creation timestamp, never mutated afterwards
///
/// Records are serialized with camelCase field names; the same names are
/// used in store filters and in persisted documents.
pub trait Entity:
    Clone + Send + Sync + Serialize + serde::de::DeserializeOwned + 'static
{
    /// The plural resource name, used as collection name and URL segment (e.g., "users")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "user")
    fn resource_name_singular() -> &'static str;

    /// Fields whose values must be unique across the collection.
    ///
    /// Stores enforce these on insert and replace.
    fn unique_fields() -> &'static [&'static str] {
        &[]
    }

    /// Get the identifier for this record
    fn id(&self) -> &RecordId;

    /// Set the identifier; called by stores on insertion
    fn assign_id(&mut self, id: RecordId);

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;
}
