//! Canonical validation limits
//!
//! One rule set per field. Every limit can be overridden from the
//! `validation:` section of the configuration file.

use serde::{Deserialize, Serialize};

/// Password strength requirements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    /// Minimum number of characters
    pub min_length: usize,

    /// Require at least one uppercase letter, one lowercase letter and one digit
    pub require_character_classes: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 6,
            require_character_classes: false,
        }
    }
}

/// Field limits applied by the entity services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    pub username_max_length: usize,
    pub email_max_length: usize,
    pub word_min_length: usize,
    pub word_max_length: usize,
    pub password: PasswordPolicy,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            username_max_length: 100,
            email_max_length: 254,
            word_min_length: 1,
            word_max_length: 200,
            password: PasswordPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let rules: ValidationRules = serde_yaml::from_str(
            "word_min_length: 2\npassword:\n  require_character_classes: true\n",
        )
        .unwrap();

        assert_eq!(rules.word_min_length, 2);
        assert_eq!(rules.word_max_length, 200);
        assert_eq!(rules.username_max_length, 100);
        assert_eq!(rules.password.min_length, 6);
        assert!(rules.password.require_character_classes);
    }
}
