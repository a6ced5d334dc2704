//! Store-backed uniqueness checks
//!
//! These run before any mutation so a conflicting request leaves the store
//! untouched. Races between two concurrent writers are closed by the store's
//! own unique constraints, which surface as the same conflict error.

use crate::core::entity::{Entity, RecordId};
use crate::core::error::{AppResult, EntityError};
use crate::core::filter::Filter;
use crate::core::store::{RecordStore, StoreResult};
use crate::entities::Word;

/// Fail with a conflict on `field` if another record already holds `value`
///
/// `exclude` is the record being updated; it never conflicts with itself.
pub async fn ensure_unique<T: Entity>(
    store: &dyn RecordStore<T>,
    field: &str,
    value: &str,
    exclude: Option<&RecordId>,
) -> AppResult<()> {
    let existing = store.find_one(&Filter::eq(field, value)).await?;

    match existing {
        Some(record) if exclude != Some(record.id()) => {
            tracing::warn!(
                entity = T::resource_name_singular(),
                field = field,
                "unique field already taken"
            );
            Err(EntityError::Conflict {
                entity_type: T::resource_name_singular().to_string(),
                field: field.to_string(),
            }
            .into())
        }
        _ => Ok(()),
    }
}

/// Find which side of a word pair collides with another word of the same owner
///
/// Returns `Some("englishWord")` or `Some("frenchWord")` for the first
/// colliding field, comparing case-insensitively. `exclude` is the word being
/// updated.
pub async fn overlapping_word_field(
    store: &dyn RecordStore<Word>,
    owner: &RecordId,
    english: &str,
    french: &str,
    exclude: Option<&RecordId>,
) -> StoreResult<Option<&'static str>> {
    let english = english.to_lowercase();
    let french = french.to_lowercase();

    let owned = store
        .find_many(&Filter::eq("userId", owner.as_str()))
        .await?;

    let others = owned.iter().filter(|word| exclude != Some(&word.id));

    let mut french_hit = false;
    for word in others {
        if word.english_word.to_lowercase() == english {
            return Ok(Some("englishWord"));
        }
        french_hit |= word.french_word.to_lowercase() == french;
    }

    Ok(french_hit.then_some("frenchWord"))
}
