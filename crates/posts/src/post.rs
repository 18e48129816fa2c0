use serde::{Deserialize, Serialize};

use summer_core::{DomainError, DomainResult, Entity, PostId, UserId};

pub const CAPTION_KEY: &str = "posts_caption_key";
pub const OWNER_KEY: &str = "posts_user_id_key";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub caption: String,
    pub user_id: UserId,
}

impl Entity for Post {
    type Id = PostId;

    fn id(&self) -> PostId {
        self.id
    }
}

/// A post about to be inserted. The owner is always the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub caption: String,
    pub user_id: UserId,
}

impl NewPost {
    pub fn new(caption: impl Into<String>, user_id: UserId) -> Self {
        Self {
            caption: caption.into(),
            user_id,
        }
    }

    /// Caption first, then owner.
    pub fn validate(&self) -> DomainResult<()> {
        if self.caption.trim().is_empty() {
            return Err(DomainError::missing(CAPTION_KEY));
        }
        if self.user_id.is_zero() {
            return Err(DomainError::missing(OWNER_KEY));
        }
        Ok(())
    }
}
