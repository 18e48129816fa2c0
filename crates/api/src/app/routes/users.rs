use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;

use summer_core::UserId;

use crate::app::dto::{JsonBody, LoginRequest, SignUpRequest, UpdateUserRequest};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::AuthenticatedUser;

pub async fn sign_up(
    Extension(services): Extension<Arc<AppServices>>,
    JsonBody(body): JsonBody<SignUpRequest>,
) -> Response {
    match services.users.register(body.into()).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => errors::user_error_to_response(e),
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Response {
    match services
        .users
        .login(&body.username, &body.password, Utc::now())
        .await
    {
        Ok(token) => Json(json!({ "token": token })).into_response(),
        Err(e) => errors::user_error_to_response(e),
    }
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: UserId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.users.get_by_id(id).await {
        Ok(user) => Json(user).into_response(),
        Err(e) => errors::user_error_to_response(e),
    }
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<UpdateUserRequest>,
) -> Response {
    match services.users.update(caller.user_id(), body.into()).await {
        Ok(user) => Json(user).into_response(),
        Err(e) => errors::user_error_to_response(e),
    }
}

