//! Infrastructure layer: configuration, database bootstrap and repositories.

pub mod config;
pub mod db;
pub mod repository;

pub use config::{ConfigError, Settings};
pub use repository::{
    InMemoryPostRepository, InMemoryUserRepository, PgPostRepository, PgUserRepository,
};
