//! REST handlers for words

use crate::core::error::{AppError, EntityError, RequestError};
use crate::core::validation::ApiJson;
use crate::entities::{NewWord, Word, WordPatch};
use crate::server::entity_registry::EntityDescriptor;
use crate::services::WordService;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

type WordState = Arc<WordService>;

/// Query string of `GET /words`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordListQuery {
    pub user_id: Option<String>,
}

/// Query string of `GET /words/duplicates`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DuplicateQuery {
    pub user_id: String,
    pub english_word: String,
    pub french_word: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DuplicateResponse {
    pub duplicate: bool,
}

fn not_found(id: String) -> AppError {
    EntityError::NotFound {
        entity_type: "word".to_string(),
        id,
    }
    .into()
}

/// All words, or the words of one owner (newest first) with `?userId=`
pub async fn list_words(
    State(words): State<WordState>,
    Query(query): Query<WordListQuery>,
) -> Result<Json<Vec<Word>>, AppError> {
    let list = match query.user_id {
        Some(user_id) => words.list_by_owner(&user_id).await?,
        None => words.list_all().await?,
    };
    Ok(Json(list))
}

pub async fn check_duplicate(
    State(words): State<WordState>,
    Query(query): Query<DuplicateQuery>,
) -> Result<Json<DuplicateResponse>, AppError> {
    if query.user_id.trim().is_empty() {
        return Err(RequestError::MissingParameter {
            parameter: "userId".to_string(),
        }
        .into());
    }

    let duplicate = words
        .is_duplicate(&query.user_id, &query.english_word, &query.french_word)
        .await;
    Ok(Json(DuplicateResponse { duplicate }))
}

pub async fn get_word(
    State(words): State<WordState>,
    Path(id): Path<String>,
) -> Result<Json<Word>, AppError> {
    words
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn create_word(
    State(words): State<WordState>,
    ApiJson(input): ApiJson<NewWord>,
) -> Result<(StatusCode, Json<Word>), AppError> {
    let word = words.create(input).await?;
    Ok((StatusCode::CREATED, Json(word)))
}

pub async fn update_word(
    State(words): State<WordState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<WordPatch>,
) -> Result<Json<Word>, AppError> {
    words
        .update(&id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn delete_word(
    State(words): State<WordState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if words.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// Routes under `/words`
pub struct WordDescriptor {
    service: WordState,
}

impl WordDescriptor {
    pub fn new(service: Arc<WordService>) -> Self {
        Self { service }
    }
}

impl EntityDescriptor for WordDescriptor {
    fn collection(&self) -> &'static str {
        "words"
    }

    fn routes(&self) -> Router {
        let root = self.collection();
        Router::new()
            .route(&format!("/{}", root), get(list_words).post(create_word))
            .route(&format!("/{}/duplicates", root), get(check_duplicate))
            .route(
                &format!("/{}/{{id}}", root),
                get(get_word).put(update_word).delete(delete_word),
            )
            .with_state(self.service.clone())
    }
}
