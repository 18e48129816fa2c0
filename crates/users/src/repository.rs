use async_trait::async_trait;

use summer_core::{StoreResult, UserId};

use crate::user::{NewUser, User};

/// Persistence port for accounts.
///
/// Soft-deleted rows are invisible to every read. A duplicate username is
/// reported as [`summer_core::StoreError::Conflict`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new row. `user.password` must already be hashed.
    async fn create(&self, user: NewUser) -> StoreResult<User>;

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Overwrite the mutable columns of an existing row and bump `updated_at`.
    async fn update(&self, user: &User) -> StoreResult<User>;
}

