use async_trait::async_trait;

use summer_core::StoreResult;

use crate::post::{NewPost, Post};

/// Persistence port for posts.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Every post, oldest first.
    async fn list(&self) -> StoreResult<Vec<Post>>;

    async fn create(&self, post: NewPost) -> StoreResult<Post>;
}

