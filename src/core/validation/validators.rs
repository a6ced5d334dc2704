//! Reusable field validators
//!
//! Pure functions over raw field values. Each returns the message for the
//! first violated constraint of that field; [`ValidationReport`] collects
//! them across fields.
//!
//! [`ValidationReport`]: super::ValidationReport

use super::ValidationReport;
use super::rules::{PasswordPolicy, ValidationRules};
use regex::Regex;
use std::sync::OnceLock;
use validator::ValidateEmail;

static EMAIL_DOMAIN_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_DOMAIN_RE.get_or_init(|| {
        // validator accepts dotless domains such as `user@localhost`; require a dotted one.
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
    })
}

/// Validator: text is present (not blank) and at most `max_length` characters
pub fn validate_required_text(value: &str, field_label: &str, max_length: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field_label));
    }

    let len = value.chars().count();
    if len > max_length {
        Err(format!(
            "{} must not exceed {} characters (currently: {})",
            field_label, max_length, len
        ))
    } else {
        Ok(())
    }
}

/// Validator: text has at least `min_length` characters
pub fn validate_min_length(value: &str, field_label: &str, min_length: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len < min_length {
        Err(format!(
            "{} must be at least {} characters (currently: {})",
            field_label, min_length, len
        ))
    } else {
        Ok(())
    }
}

/// Validator: value looks like `local-part@domain.tld`
pub fn validate_email_shape(value: &str) -> Result<(), String> {
    if value.validate_email() && email_regex().is_match(value) {
        Ok(())
    } else {
        Err("Email is not a valid email address".to_string())
    }
}

/// Validator: password satisfies the configured policy
pub fn validate_password_strength(value: &str, policy: &PasswordPolicy) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("Password is required".to_string());
    }
    validate_min_length(value, "Password", policy.min_length)?;

    if policy.require_character_classes {
        if !value.chars().any(|c| c.is_lowercase()) {
            return Err("Password must contain at least one lowercase letter".to_string());
        }
        if !value.chars().any(|c| c.is_uppercase()) {
            return Err("Password must contain at least one uppercase letter".to_string());
        }
        if !value.chars().any(|c| c.is_ascii_digit()) {
            return Err("Password must contain at least one digit".to_string());
        }
    }

    Ok(())
}

/// Validate a single word of a pair
pub fn validate_word(value: &str, field_label: &str, rules: &ValidationRules) -> Result<(), String> {
    validate_required_text(value, field_label, rules.word_max_length)?;
    validate_min_length(value.trim(), field_label, rules.word_min_length)
}

/// Validate an english/french pair, reporting both fields
pub fn validate_word_pair(english: &str, french: &str, rules: &ValidationRules) -> ValidationReport {
    let mut report = ValidationReport::new();
    report.check("englishWord", validate_word(english, "English word", rules));
    report.check("frenchWord", validate_word(french, "French word", rules));
    report
}
