//! Validation system
//!
//! Field validators are pure functions returning `Result<(), String>`.
//! A [`ValidationReport`] runs several of them and keeps every failure, so a
//! request with three bad fields gets three messages back instead of one.

pub mod extractor;
pub mod rules;
pub mod validators;

use crate::core::error::{FieldValidationError, ValidationError};

pub use extractor::ApiJson;
pub use rules::{PasswordPolicy, ValidationRules};

/// Accumulates field errors before they are surfaced as one [`ValidationError`]
#[derive(Debug, Default)]
pub struct ValidationReport {
    errors: Vec<FieldValidationError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a validator for `field`
    pub fn check(&mut self, field: &str, outcome: Result<(), String>) {
        if let Err(message) = outcome {
            self.add(field, message);
        }
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldValidationError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Append every error of another report
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok` when no field failed
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.errors))
        }
    }
}
