//! Typed error handling for the Polyglotte services
//!
//! This module provides the error hierarchy shared by the services and the
//! REST exposure, so callers can match on specific failures instead of
//! inspecting messages.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: one or more field-level constraint violations
//! - [`EntityError`]: conflicts on unique fields and missing records
//! - [`RequestError`]: malformed requests and rejected credentials
//! - [`StoreError`]: lower-layer failures from a record store
//!
//! "Not found" is not an error inside the services: they return `Option` or
//! `bool`. [`EntityError::NotFound`] exists for the HTTP layer, which turns
//! an absent result into a 404.
//!
//! # Example
//!
//! ```rust,ignore
//! match users.create(input).await {
//!     Ok(user) => println!("created {}", user.id),
//!     Err(AppError::Entity(EntityError::Conflict { field, .. })) => {
//!         println!("{} already taken", field);
//!     }
//!     Err(AppError::Validation(report)) => println!("{}", report),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use crate::core::store::StoreError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The main error type returned by the entity services
#[derive(Debug)]
pub enum AppError {
    /// Entity-related errors (conflicts, missing records)
    Entity(EntityError),

    /// Field validation errors
    Validation(ValidationError),

    /// HTTP/Request errors
    Request(RequestError),

    /// Record store errors
    Store(StoreError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Entity(e) => write!(f, "{}", e),
            AppError::Validation(e) => write!(f, "{}", e),
            AppError::Request(e) => write!(f, "{}", e),
            AppError::Store(e) => write!(f, "{}", e),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Entity(e) => Some(e),
            AppError::Validation(e) => Some(e),
            AppError::Request(e) => Some(e),
            AppError::Store(e) => Some(e),
            AppError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Entity(e) => e.status_code(),
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Request(e) => e.status_code(),
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Entity(e) => e.error_code(),
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Request(e) => e.error_code(),
            AppError::Store(_) => "STORE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Field that caused a uniqueness conflict, if this is a conflict
    pub fn conflict_field(&self) -> Option<&str> {
        match self {
            AppError::Entity(EntityError::Conflict { field, .. }) => Some(field.as_str()),
            _ => None,
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id
                }))
            }
            AppError::Entity(EntityError::Conflict { entity_type, field }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "field": field
                }))
            }
            AppError::Validation(e) => Some(serde_json::json!({ "fields": e.to_map() })),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity operations
#[derive(Debug)]
pub enum EntityError {
    /// Record was not found
    NotFound { entity_type: String, id: String },

    /// A unique field already holds the submitted value
    Conflict { entity_type: String, field: String },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, id } => {
                write!(f, "{} with id '{}' not found", entity_type, id)
            }
            EntityError::Conflict { entity_type, field } => {
                write!(f, "{} with this {} already exists", entity_type, field)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::Conflict { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::Conflict { .. } => "ENTITY_CONFLICT",
        }
    }
}

impl From<EntityError> for AppError {
    fn from(err: EntityError) -> Self {
        AppError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// One or more field validation failures, reported together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldValidationError>,
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldValidationError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[FieldValidationError] {
        &self.errors
    }

    /// Whether any error was reported for `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Group messages by field name
    pub fn to_map(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for error in &self.errors {
            map.entry(error.field.clone())
                .or_default()
                .push(error.message.clone());
        }
        map
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "Validation errors: {}", msgs.join(", "))
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug)]
pub enum RequestError {
    /// Invalid request body
    InvalidBody { message: String },

    /// Missing required query parameter
    MissingParameter { parameter: String },

    /// Credentials did not match a user
    Unauthorized { message: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidBody { message } => {
                write!(f, "Invalid request body: {}", message)
            }
            RequestError::MissingParameter { parameter } => {
                write!(f, "Missing required parameter: {}", parameter)
            }
            RequestError::Unauthorized { message } => {
                write!(f, "Unauthorized: {}", message)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::MissingParameter { .. } => StatusCode::BAD_REQUEST,
            RequestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::MissingParameter { .. } => "MISSING_PARAMETER",
            RequestError::Unauthorized { .. } => "UNAUTHORIZED",
        }
    }
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        AppError::Request(err)
    }
}

// =============================================================================
// Conversions from lower layers
// =============================================================================

impl From<StoreError> for AppError {
    /// Duplicate-key violations become conflicts on the offending field;
    /// everything else stays a store failure.
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey { collection, field } => {
                AppError::Entity(EntityError::Conflict {
                    entity_type: singular(&collection),
                    field,
                })
            }
            other => AppError::Store(other),
        }
    }
}

fn singular(collection: &str) -> String {
    collection
        .strip_suffix('s')
        .unwrap_or(collection)
        .to_string()
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for service operations
pub type AppResult<T> = Result<T, AppError>;

// =============================================================================
// Tests
// =============================================================================
