//! `summer-core`: shared building blocks for every layer.
//!
//! Pure types only: identifiers, the domain error model and the storage error
//! surfaced by repositories. No IO lives here.

pub mod entity;
pub mod error;
pub mod id;
pub mod store;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{PostId, UserId};
pub use store::{StoreError, StoreResult};
