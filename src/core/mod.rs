//! Core module: records, stores, errors and validation shared by every layer

pub mod entity;
pub mod error;
pub mod filter;
pub mod password;
pub mod store;
pub mod validation;

pub use entity::{Entity, RecordId};
pub use error::{AppError, AppResult};
pub use filter::{Filter, SortDirection};
pub use store::{RecordStore, StoreError, StoreResult};
