//! Startup wiring: repositories → use-cases → [`AppServices`].

use std::sync::Arc;

use sqlx::PgPool;

use summer_auth::{Argon2Scheme, Hs256Jwt};
use summer_infra::{
    InMemoryPostRepository, InMemoryUserRepository, PgPostRepository, PgUserRepository,
};
use summer_posts::{PostRepository, PostUseCase};
use summer_users::{UserRepository, UserUseCase};

/// Everything a handler needs, shared behind one `Arc`.
pub struct AppServices {
    pub users: UserUseCase,
    pub posts: PostUseCase,
    pub jwt: Arc<Hs256Jwt>,
}

impl AppServices {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        jwt_secret: &str,
    ) -> Self {
        let jwt = Arc::new(Hs256Jwt::new(jwt_secret));
        Self {
            users: UserUseCase::new(users, jwt.clone(), Arc::new(Argon2Scheme)),
            posts: PostUseCase::new(posts),
            jwt,
        }
    }

    /// PostgreSQL-backed services (production).
    pub fn postgres(pool: PgPool, jwt_secret: &str) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgPostRepository::new(pool)),
            jwt_secret,
        )
    }

    /// Process-local services for tests and local runs without a database.
    pub fn in_memory(jwt_secret: &str) -> Self {
        Self::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
            jwt_secret,
        )
    }
}
