use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use summer_core::{DomainError, StoreError, UserId};

use crate::post::{NewPost, Post};
use crate::repository::PostRepository;

#[derive(Debug, Error)]
pub enum PostError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct PostUseCase {
    repo: Arc<dyn PostRepository>,
}

impl PostUseCase {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// All posts. No filtering, no pagination.
    pub async fn list(&self) -> Result<Vec<Post>, PostError> {
        Ok(self.repo.list().await?)
    }

    /// `owner` must be the verified caller; clients never choose it.
    pub async fn create(&self, caption: String, owner: UserId) -> Result<Post, PostError> {
        let post = NewPost::new(caption, owner);
        post.validate()?;

        let stored = self.repo.create(post).await?;
        info!(post_id = %stored.id, user_id = %stored.user_id, "post created");
        Ok(stored)
    }
}
