//! User record and its request/response shapes

use crate::core::entity::{Entity, RecordId, creation_timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user
///
/// The password is only ever kept as an Argon2 PHC string. Use
/// [`UserResponse`] for anything leaving the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: RecordId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build an unsaved user; the store assigns the id
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: RecordId::default(),
            username,
            email,
            password_hash,
            created_at: creation_timestamp(),
        }
    }
}

impl Entity for User {
    fn resource_name() -> &'static str {
        "users"
    }

    fn resource_name_singular() -> &'static str {
        "user"
    }

    fn unique_fields() -> &'static [&'static str] {
        &["username", "email"]
    }

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Registration payload
///
/// Missing fields deserialize as empty strings so that they are reported by
/// validation together with the other field errors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Partial update of a user
///
/// An absent field keeps its stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Email/password pair checked by the credential endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: RecordId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}
