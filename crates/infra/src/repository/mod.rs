//! Repository implementations for the use-case ports.
//!
//! `postgres` is what the binary runs against; `in_memory` backs tests and
//! local experiments with the same uniqueness semantics.

pub mod in_memory;
pub mod postgres;

pub use in_memory::{InMemoryPostRepository, InMemoryUserRepository};
pub use postgres::{PgPostRepository, PgUserRepository};
