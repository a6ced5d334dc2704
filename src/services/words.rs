//! Word entity service

use crate::core::entity::RecordId;
use crate::core::error::{AppResult, EntityError};
use crate::core::filter::{Filter, SortDirection};
use crate::core::store::RecordStore;
use crate::core::validation::validators::{validate_word, validate_word_pair};
use crate::core::validation::{ValidationReport, ValidationRules};
use crate::entities::{NewWord, Word, WordPatch};
use crate::services::uniqueness::overlapping_word_field;
use std::sync::Arc;

/// Business rules for words: pair validation and per-owner duplicate
/// avoidance
///
/// A pair is a duplicate when another word of the same owner has the same
/// english word or the same french word, ignoring case.
pub struct WordService {
    words: Arc<dyn RecordStore<Word>>,
    rules: ValidationRules,
}

impl WordService {
    pub fn new(words: Arc<dyn RecordStore<Word>>, rules: ValidationRules) -> Self {
        Self { words, rules }
    }

    pub async fn list_all(&self) -> AppResult<Vec<Word>> {
        Ok(self.words.find_many(&Filter::all()).await?)
    }

    /// Words of one owner, newest first
    pub async fn list_by_owner(&self, user_id: &str) -> AppResult<Vec<Word>> {
        let Some(owner) = RecordId::parse(user_id) else {
            return Ok(Vec::new());
        };
        let filter =
            Filter::eq("userId", owner.as_str()).sort_by("createdAt", SortDirection::Descending);
        Ok(self.words.find_many(&filter).await?)
    }

    /// Blank or unknown ids yield `None`
    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Word>> {
        let Some(id) = RecordId::parse(id) else {
            return Ok(None);
        };
        tracing::debug!(word_id = %id, "looking up word");
        Ok(self.words.find_by_id(&id).await?)
    }

    pub async fn create(&self, input: NewWord) -> AppResult<Word> {
        let owner = RecordId::parse(&input.user_id);

        let mut report = ValidationReport::new();
        if owner.is_none() {
            report.add("userId", "User id is required");
        }
        report.merge(validate_word_pair(
            &input.english_word,
            &input.french_word,
            &self.rules,
        ));
        report.into_result()?;
        let owner = owner.unwrap_or_default();

        self.ensure_no_overlap(&owner, &input.english_word, &input.french_word, None)
            .await?;

        let word = self
            .words
            .insert_one(Word::new(owner, input.english_word, input.french_word))
            .await?;

        tracing::info!(word_id = %word.id, user_id = %word.user_id, "word created");
        Ok(word)
    }

    /// Replace the english and/or french side of a word
    ///
    /// The owner and creation time never change.
    pub async fn update(&self, id: &str, patch: WordPatch) -> AppResult<Option<Word>> {
        let Some(id) = RecordId::parse(id) else {
            return Ok(None);
        };

        let mut report = ValidationReport::new();
        if let Some(english) = &patch.english_word {
            report.check("englishWord", validate_word(english, "English word", &self.rules));
        }
        if let Some(french) = &patch.french_word {
            report.check("frenchWord", validate_word(french, "French word", &self.rules));
        }
        report.into_result()?;

        let Some(mut word) = self.words.find_by_id(&id).await? else {
            return Ok(None);
        };

        if let Some(english) = patch.english_word {
            word.english_word = english;
        }
        if let Some(french) = patch.french_word {
            word.french_word = french;
        }

        self.ensure_no_overlap(&word.user_id, &word.english_word, &word.french_word, Some(&word.id))
            .await?;

        if !self.words.replace_one(&word).await? {
            return Ok(None);
        }

        tracing::info!(word_id = %word.id, "word updated");
        Ok(Some(word))
    }

    /// `true` only when a word was removed
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let Some(id) = RecordId::parse(id) else {
            return Ok(false);
        };
        let removed = self.words.delete_one(&id).await?;
        if removed {
            tracing::info!(word_id = %id, "word deleted");
        }
        Ok(removed)
    }

    /// Advisory duplicate check for clients, before they submit a pair
    ///
    /// A store failure is logged and reported as "not a duplicate"; `create`
    /// still enforces the rule.
    pub async fn is_duplicate(&self, user_id: &str, english: &str, french: &str) -> bool {
        let Some(owner) = RecordId::parse(user_id) else {
            return false;
        };

        match overlapping_word_field(self.words.as_ref(), &owner, english, french, None).await {
            Ok(field) => field.is_some(),
            Err(e) => {
                tracing::warn!(user_id = %owner, error = %e, "duplicate check failed");
                false
            }
        }
    }

    async fn ensure_no_overlap(
        &self,
        owner: &RecordId,
        english: &str,
        french: &str,
        exclude: Option<&RecordId>,
    ) -> AppResult<()> {
        match overlapping_word_field(self.words.as_ref(), owner, english, french, exclude).await? {
            Some(field) => {
                tracing::warn!(user_id = %owner, field = field, "duplicate word rejected");
                Err(EntityError::Conflict {
                    entity_type: "word".to_string(),
                    field: field.to_string(),
                }
                .into())
            }
            None => Ok(()),
        }
    }
}
