use axum::{
    Router,
    routing::{get, patch, post},
};

pub mod posts;
pub mod system;
pub mod users;

/// Routes reachable without a token.
pub fn public_router() -> Router {
    Router::new()
        .route("/", get(system::liveness))
        .route("/sign_up", post(users::sign_up))
        .route("/login", post(users::login))
}

/// Routes that require a verified bearer token.
pub fn protected_router() -> Router {
    Router::new()
        .route("/browse", get(posts::browse))
        .route("/posts", post(posts::create_post))
        .route("/users/update", patch(users::update_user))
        .route("/users/:id", get(users::get_user))
}
