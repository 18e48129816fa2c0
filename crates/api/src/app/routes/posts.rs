use std::sync::Arc;

use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::app::dto::{CreatePostRequest, JsonOrForm};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::AuthenticatedUser;

pub async fn browse(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.posts.list().await {
        Ok(posts) => Json(posts).into_response(),
        Err(e) => errors::post_error_to_response(e),
    }
}

pub async fn create_post(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<AuthenticatedUser>,
    JsonOrForm(body): JsonOrForm<CreatePostRequest>,
) -> Response {
    match services.posts.create(body.caption, caller.user_id()).await {
        Ok(post) => (StatusCode::CREATED, Json(post)).into_response(),
        Err(e) => errors::post_error_to_response(e),
    }
}
