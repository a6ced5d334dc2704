//! User entity service

use crate::core::entity::RecordId;
use crate::core::error::AppResult;
use crate::core::filter::Filter;
use crate::core::password::{hash_password, verify_password};
use crate::core::store::RecordStore;
use crate::core::validation::validators::{
    validate_email_shape, validate_password_strength, validate_required_text,
};
use crate::core::validation::{ValidationReport, ValidationRules};
use crate::entities::{NewUser, User, UserPatch, Word};
use crate::services::uniqueness::ensure_unique;
use std::sync::Arc;

/// Business rules for users: field validation, global uniqueness of
/// username and email, password hashing
pub struct UserService {
    users: Arc<dyn RecordStore<User>>,
    rules: ValidationRules,
    /// Set when deleting a user also deletes the words they own
    cascade_words: Option<Arc<dyn RecordStore<Word>>>,
}

impl UserService {
    pub fn new(users: Arc<dyn RecordStore<User>>, rules: ValidationRules) -> Self {
        Self {
            users,
            rules,
            cascade_words: None,
        }
    }

    /// Delete the user's words together with the user
    pub fn with_word_cascade(mut self, words: Arc<dyn RecordStore<Word>>) -> Self {
        self.cascade_words = Some(words);
        self
    }

    pub async fn list_all(&self) -> AppResult<Vec<User>> {
        Ok(self.users.find_many(&Filter::all()).await?)
    }

    /// Blank or unknown ids yield `None`
    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let Some(id) = RecordId::parse(id) else {
            return Ok(None);
        };
        tracing::debug!(user_id = %id, "looking up user");
        Ok(self.users.find_by_id(&id).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        if email.trim().is_empty() {
            return Ok(None);
        }
        Ok(self.users.find_one(&Filter::eq("email", email)).await?)
    }

    pub async fn create(&self, input: NewUser) -> AppResult<User> {
        let mut report = ValidationReport::new();
        report.check("username", self.check_username(&input.username));
        report.check("email", self.check_email(&input.email));
        report.check(
            "password",
            validate_password_strength(&input.password, &self.rules.password),
        );
        report.into_result()?;

        let store = self.users.as_ref();
        ensure_unique(store, "username", &input.username, None).await?;
        ensure_unique(store, "email", &input.email, None).await?;

        let password_hash = hash_password(&input.password).await?;
        let user = self
            .users
            .insert_one(User::new(input.username, input.email, password_hash))
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "user created");
        Ok(user)
    }

    /// Apply the present fields of `patch`
    ///
    /// Only fields whose value actually changes are checked for uniqueness.
    pub async fn update(&self, id: &str, patch: UserPatch) -> AppResult<Option<User>> {
        let Some(id) = RecordId::parse(id) else {
            return Ok(None);
        };

        let mut report = ValidationReport::new();
        if let Some(username) = &patch.username {
            report.check("username", self.check_username(username));
        }
        if let Some(email) = &patch.email {
            report.check("email", self.check_email(email));
        }
        if let Some(password) = &patch.password {
            report.check(
                "password",
                validate_password_strength(password, &self.rules.password),
            );
        }
        report.into_result()?;

        let Some(mut user) = self.users.find_by_id(&id).await? else {
            return Ok(None);
        };

        let store = self.users.as_ref();
        if let Some(username) = patch.username.filter(|u| *u != user.username) {
            ensure_unique(store, "username", &username, Some(&user.id)).await?;
            user.username = username;
        }
        if let Some(email) = patch.email.filter(|e| *e != user.email) {
            ensure_unique(store, "email", &email, Some(&user.id)).await?;
            user.email = email;
        }
        if let Some(password) = patch.password {
            user.password_hash = hash_password(&password).await?;
        }

        if !self.users.replace_one(&user).await? {
            // Removed between the read and the write
            return Ok(None);
        }

        tracing::info!(user_id = %user.id, "user updated");
        Ok(Some(user))
    }

    /// `true` only when a user was removed
    ///
    /// With the word cascade on, the owned words go first and the user last,
    /// so a failure part-way leaves the user in place for a retry.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let Some(id) = RecordId::parse(id) else {
            return Ok(false);
        };

        if let Some(words) = &self.cascade_words {
            if self.users.find_by_id(&id).await?.is_none() {
                return Ok(false);
            }
            let owned = words.find_many(&Filter::eq("userId", id.as_str())).await?;
            for word in &owned {
                words.delete_one(&word.id).await?;
            }
            tracing::info!(user_id = %id, count = owned.len(), "deleted words of user");
        }

        let removed = self.users.delete_one(&id).await?;
        if removed {
            tracing::info!(user_id = %id, "user deleted");
        }
        Ok(removed)
    }

    /// Return the user when `password` matches the stored hash
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let Some(user) = self.find_by_email(email).await? else {
            tracing::debug!("credential check for unknown email");
            return Ok(None);
        };

        if verify_password(password, &user.password_hash).await {
            Ok(Some(user))
        } else {
            tracing::debug!(user_id = %user.id, "credential check failed");
            Ok(None)
        }
    }

    fn check_username(&self, username: &str) -> Result<(), String> {
        validate_required_text(username, "Username", self.rules.username_max_length)
    }

    fn check_email(&self, email: &str) -> Result<(), String> {
        validate_required_text(email, "Email", self.rules.email_max_length)?;
        validate_email_shape(email)
    }
}
