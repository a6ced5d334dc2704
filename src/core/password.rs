//! Argon2id password hashing
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$...`), which carry their
//! own salt and parameters. Argon2 is CPU-bound, so both operations run on
//! tokio's blocking pool.

use crate::core::error::AppError;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a plain-text password with a fresh random salt
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(|e| AppError::Internal(format!("password hashing task failed: {}", e)))?
}

/// Check a plain-text password against a stored PHC string
///
/// An unparseable stored hash never matches.
pub async fn verify_password(password: &str, stored_hash: &str) -> bool {
    let password = password.to_owned();
    let stored_hash = stored_hash.to_owned();
    match tokio::task::spawn_blocking(move || verify_blocking(&password, &stored_hash)).await {
        Ok(matched) => matched,
        Err(e) => {
            tracing::error!("password verification task failed: {}", e);
            false
        }
    }
}

fn hash_blocking(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("failed to hash password: {}", e)))
}

fn verify_blocking(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("stored password hash is not a valid PHC string: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_is_phc_and_salted() {
        let first = hash_password("secret1").await.unwrap();
        let second = hash_password("secret1").await.unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert!(!first.contains("secret1"));
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_verify_matches_only_the_original() {
        let hash = hash_password("secret1").await.unwrap();
        assert!(verify_password("secret1", &hash).await);
        assert!(!verify_password("secret2", &hash).await);
        assert!(!verify_password("", &hash).await);
    }

    #[tokio::test]
    async fn test_verify_rejects_garbage_hash() {
        assert!(!verify_password("secret1", "secret1").await);
        assert!(!verify_password("secret1", "").await);
    }
}
