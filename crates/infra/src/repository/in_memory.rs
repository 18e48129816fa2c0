use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use summer_core::{Entity, PostId, StoreError, StoreResult, UserId};
use summer_posts::{NewPost, Post, PostRepository};
use summer_users::{NewUser, User, UserRepository};

/// Rows keyed by id with a serial counter, like a table with a BIGSERIAL key.
#[derive(Debug)]
struct Table<E: Entity> {
    rows: BTreeMap<E::Id, E>,
    last_id: i64,
}

impl<E: Entity> Default for Table<E> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<E: Entity + Clone> Table<E> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn insert(&mut self, row: E) -> E {
        self.rows.insert(row.id(), row.clone());
        row
    }
}

fn poisoned() -> StoreError {
    StoreError::Database("in-memory table lock poisoned".to_string())
}

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<Table<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let mut table = self.table.write().map_err(|_| poisoned())?;
        if table.rows.values().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict(format!(
                "duplicate key value violates unique constraint \"users_username_key\" ({})",
                user.username
            )));
        }

        let now = Utc::now();
        let id = UserId::new(table.next_id());
        Ok(table.insert(User {
            id,
            username: user.username,
            name: user.name,
            email: user.email,
            password: user.password,
            follower_count: 0,
            following_count: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }))
    }

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table
            .rows
            .get(&id)
            .filter(|u| u.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table
            .rows
            .values()
            .find(|u| u.username == username && u.deleted_at.is_none())
            .cloned())
    }

    async fn update(&self, user: &User) -> StoreResult<User> {
        let mut table = self.table.write().map_err(|_| poisoned())?;
        if table
            .rows
            .values()
            .any(|u| u.id != user.id && u.username == user.username)
        {
            return Err(StoreError::Conflict(format!(
                "duplicate key value violates unique constraint \"users_username_key\" ({})",
                user.username
            )));
        }

        let row = table
            .rows
            .get_mut(&user.id)
            .filter(|u| u.deleted_at.is_none())
            .ok_or_else(|| StoreError::NotFound(format!("user {}", user.id)))?;

        row.username = user.username.clone();
        row.name = user.name.clone();
        row.email = user.email.clone();
        row.password = user.password.clone();
        row.follower_count = user.follower_count;
        row.following_count = user.following_count;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    table: RwLock<Table<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self) -> StoreResult<Vec<Post>> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table.rows.values().cloned().collect())
    }

    async fn create(&self, post: NewPost) -> StoreResult<Post> {
        let mut table = self.table.write().map_err(|_| poisoned())?;
        let id = PostId::new(table.next_id());
        Ok(table.insert(Post {
            id,
            caption: post.caption,
            user_id: post.user_id,
        }))
    }
}
