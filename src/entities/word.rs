//! Word record: one english/french pair owned by a user

use crate::core::entity::{Entity, RecordId, creation_timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A vocabulary entry
///
/// `user_id` is a back-reference to the owning user; only the two word
/// fields change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    #[serde(default)]
    pub id: RecordId,
    pub user_id: RecordId,
    pub english_word: String,
    pub french_word: String,
    pub created_at: DateTime<Utc>,
}

impl Word {
    /// Build an unsaved word; the store assigns the id
    pub fn new(user_id: RecordId, english_word: String, french_word: String) -> Self {
        Self {
            id: RecordId::default(),
            user_id,
            english_word,
            french_word,
            created_at: creation_timestamp(),
        }
    }
}

impl Entity for Word {
    fn resource_name() -> &'static str {
        "words"
    }

    fn resource_name_singular() -> &'static str {
        "word"
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Creation payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewWord {
    pub user_id: String,
    pub english_word: String,
    pub french_word: String,
}

/// Partial update of a word; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WordPatch {
    pub english_word: Option<String>,
    pub french_word: Option<String>,
}
