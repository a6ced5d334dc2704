//! Shared test harness for record store backends
//!
//! Provides record builders with controlled timestamps and the
//! `record_store_tests!` macro that runs the `RecordStore` contract against
//! any backend.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

pub mod record_store_tests;

use chrono::{DateTime, Duration, Utc};
use polyglotte::core::entity::RecordId;
use polyglotte::entities::{User, Word};

/// A well-formed id that no store will ever have assigned
///
/// Valid as an ObjectId so backends that parse ids still perform the lookup.
pub const UNKNOWN_ID: &str = "65f000000000000000000000";

/// Fixed reference instant, truncated to whole seconds so every backend
/// stores it without loss
pub fn base_time() -> DateTime<Utc> {
    "2024-05-01T10:00:00Z".parse().unwrap()
}

pub fn sample_user(username: &str) -> User {
    let mut user = User::new(
        username.to_string(),
        format!("{}@example.com", username),
        "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
    );
    user.created_at = base_time();
    user
}

/// Word created `minutes_after` the base time
pub fn sample_word(owner: &str, english: &str, french: &str, minutes_after: i64) -> Word {
    let mut word = Word::new(RecordId::new(owner), english.to_string(), french.to_string());
    word.created_at = base_time() + Duration::minutes(minutes_after);
    word
}
