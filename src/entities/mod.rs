//! Record types stored by the service: users and their words

pub mod user;
pub mod word;

pub use user::{Credentials, NewUser, User, UserPatch, UserResponse};
pub use word::{NewWord, Word, WordPatch};
