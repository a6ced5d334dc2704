//! Entity services
//!
//! The only place business rules are enforced. Handlers call services;
//! services call the record stores.

pub mod uniqueness;
pub mod users;
pub mod words;

pub use users::UserService;
pub use words::WordService;
