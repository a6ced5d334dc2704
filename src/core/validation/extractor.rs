//! Axum extractor for JSON request bodies
//!
//! Axum's own `Json` rejection answers with a plain-text body. [`ApiJson`]
//! turns the rejection into an [`AppError`] so malformed payloads get the
//! same JSON error shape as every other failure.

use crate::core::error::{AppError, RequestError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// JSON body extractor with [`AppError`] rejections
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_word(
///     State(state): State<WordAppState>,
///     ApiJson(input): ApiJson<NewWord>,
/// ) -> Result<(StatusCode, Json<Word>), AppError> {
///     // input is deserialized; field rules are checked by the service
/// }
/// ```
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(payload)) => Ok(ApiJson(payload)),
            Err(rejection) => Err(RequestError::InvalidBody {
                message: rejection.body_text(),
            }
            .into()),
        }
    }
}
