//! PostgreSQL repositories.
//!
//! One statement per call, no explicit transactions.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Code | StoreError |
//! |------------|-----------------|------------|
//! | Database (unique violation) | `23505` | `Conflict` |
//! | Database (other) | any | `Database` |
//! | RowNotFound | N/A | `NotFound` |
//! | anything else | N/A | `Database` |

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use summer_core::{PostId, StoreError, StoreResult, UserId};
use summer_posts::{NewPost, Post, PostRepository};
use summer_users::{NewUser, User, UserRepository};

const USER_COLUMNS: &str = "id, username, name, email, password, follower_count, following_count, created_at, updated_at, deleted_at";

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    name: String,
    email: String,
    password: String,
    follower_count: i32,
    following_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            username: row.username,
            name: row.name,
            email: row.email,
            password: row.password,
            follower_count: row.follower_count,
            following_count: row.following_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    caption: String,
    user_id: i64,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: PostId::new(row.id),
            caption: row.caption,
            user_id: UserId::new(row.user_id),
        }
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") => StoreError::Conflict(msg),
                _ => StoreError::Database(msg),
            }
        }
        sqlx::Error::RowNotFound => StoreError::NotFound(format!("no row in {}", operation)),
        other => StoreError::Database(format!("sqlx error in {}: {}", operation, other)),
    }
}

/// `users` table access.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self, user), fields(username = %user.username), err)]
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let row: UserRow = sqlx::query_as(&format!(
            "INSERT INTO users (username, name, email, password) VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_user", e))?;

        Ok(row.into())
    }

    #[instrument(skip(self), fields(user_id = %id), err)]
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_user_by_id", e))?;

        Ok(row.map(User::from))
    }

    #[instrument(skip(self), err)]
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1 AND deleted_at IS NULL"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_user_by_username", e))?;

        Ok(row.map(User::from))
    }

    #[instrument(skip(self, user), fields(user_id = %user.id), err)]
    async fn update(&self, user: &User) -> StoreResult<User> {
        let row: UserRow = sqlx::query_as(&format!(
            r#"
            UPDATE users
            SET username = $2,
                name = $3,
                email = $4,
                password = $5,
                follower_count = $6,
                following_count = $7,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id.get())
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.follower_count)
        .bind(user.following_count)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_user", e))?;

        Ok(row.into())
    }
}

/// `posts` table access.
#[derive(Debug, Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self), err)]
    async fn list(&self) -> StoreResult<Vec<Post>> {
        let rows: Vec<PostRow> = sqlx::query_as("SELECT id, caption, user_id FROM posts ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_posts", e))?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self, post), fields(user_id = %post.user_id), err)]
    async fn create(&self, post: NewPost) -> StoreResult<Post> {
        let row: PostRow = sqlx::query_as(
            "INSERT INTO posts (caption, user_id) VALUES ($1, $2) RETURNING id, caption, user_id",
        )
        .bind(&post.caption)
        .bind(post.user_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_post", e))?;

        Ok(row.into())
    }
}
