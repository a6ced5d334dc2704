//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses carry the code and the offending fields
//! - Store errors convert to the right application errors

use axum::http::StatusCode;
use axum::response::IntoResponse;
use polyglotte::core::error::FieldValidationError;
use polyglotte::prelude::*;

fn validation(fields: &[(&str, &str)]) -> AppError {
    AppError::Validation(ValidationError::new(
        fields
            .iter()
            .map(|(field, message)| FieldValidationError {
                field: field.to_string(),
                message: message.to_string(),
            })
            .collect(),
    ))
}

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_not_found_returns_404() {
        let err = AppError::Entity(EntityError::NotFound {
            entity_type: "word".to_string(),
            id: "abc".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_returns_409() {
        let err = AppError::Entity(EntityError::Conflict {
            entity_type: "user".to_string(),
            field: "email".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_returns_400() {
        assert_eq!(
            validation(&[("email", "invalid format")]).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_request_errors() {
        let invalid: AppError = RequestError::InvalidBody {
            message: "expected value".to_string(),
        }
        .into();
        let missing: AppError = RequestError::MissingParameter {
            parameter: "userId".to_string(),
        }
        .into();
        let unauthorized: AppError = RequestError::Unauthorized {
            message: "Invalid email or password".to_string(),
        }
        .into();

        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_store_and_internal_return_500() {
        let store: AppError = StoreError::Unavailable {
            message: "lock poisoned".to_string(),
        }
        .into();
        assert_eq!(store.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            AppError::Internal("hash failed".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

// =============================================================================
// Conversion Tests
// =============================================================================

mod conversion_tests {
    use super::*;

    #[test]
    fn test_duplicate_key_becomes_conflict() {
        let err: AppError = StoreError::DuplicateKey {
            collection: "users".to_string(),
            field: "username".to_string(),
        }
        .into();

        assert_eq!(err.conflict_field(), Some("username"));
        match err {
            AppError::Entity(EntityError::Conflict { entity_type, .. }) => {
                assert_eq!(entity_type, "user")
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_query_error_stays_store_error() {
        let err: AppError = StoreError::Query {
            backend: "mongodb".to_string(),
            message: "timeout".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Store(StoreError::Query { .. })));
        assert_eq!(err.conflict_field(), None);
        assert_eq!(err.error_code(), "STORE_ERROR");
    }
}

// =============================================================================
// Response Format Tests
// =============================================================================

mod response_tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_response_groups_fields() {
        let err = validation(&[
            ("username", "Username is required"),
            ("password", "Password must be at least 6 characters"),
        ]);
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["fields"]["username"][0], "Username is required");
        assert!(body["details"]["fields"]["password"].is_array());
    }

    #[tokio::test]
    async fn test_conflict_response_names_field() {
        let err = AppError::Entity(EntityError::Conflict {
            entity_type: "word".to_string(),
            field: "frenchWord".to_string(),
        });
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "ENTITY_CONFLICT");
        assert_eq!(body["details"]["field"], "frenchWord");
        assert_eq!(body["details"]["entity_type"], "word");
    }

    #[tokio::test]
    async fn test_internal_response_has_no_details() {
        let (status, body) = body_json(AppError::Internal("boom".to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert!(body.get("details").is_none());
    }
}

// =============================================================================
// Error Matching Tests
// =============================================================================

mod matching_tests {
    use super::*;

    #[test]
    fn test_match_specific_conflict() {
        let err = AppError::Entity(EntityError::Conflict {
            entity_type: "user".to_string(),
            field: "email".to_string(),
        });

        let message = match err {
            AppError::Entity(EntityError::Conflict { field, .. }) if field == "email" => {
                "email taken"
            }
            AppError::Entity(EntityError::Conflict { .. }) => "other conflict",
            _ => "unexpected",
        };
        assert_eq!(message, "email taken");
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let err: AppError = StoreError::Connection {
            backend: "mongodb".to_string(),
            message: "refused".to_string(),
        }
        .into();
        assert!(err.source().is_some());
        assert!(AppError::Internal("x".to_string()).source().is_none());
    }
}
