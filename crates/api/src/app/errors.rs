//! Error envelope: `{"kind": ..., "message": ...}`, plus `"field"` for
//! validation failures.
//!
//! Every failure is a 500 except a missing bearer token (401); clients branch
//! on `kind`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use summer_auth::TokenError;
use summer_core::{DomainError, StoreError};
use summer_posts::PostError;
use summer_users::UserError;

pub fn json_error(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "kind": kind,
            "message": message.into(),
        })),
    )
        .into_response()
}

fn failure(kind: &'static str, message: impl Into<String>) -> Response {
    json_error(StatusCode::INTERNAL_SERVER_ERROR, kind, message)
}

pub fn validation_error(field: &'static str, message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "kind": "validation_error",
            "field": field,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn malformed_body(message: impl Into<String>) -> Response {
    failure("malformed_body", message)
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    let message = err.to_string();
    match err {
        DomainError::MissingField { field } | DomainError::InvalidField { field } => {
            validation_error(field, message)
        }
        DomainError::InvalidId(_) => failure("invalid_id", message),
        DomainError::NotFound => failure("not_found", message),
        DomainError::InvalidCredentials => failure("invalid_credentials", message),
    }
}

pub fn store_error_to_response(err: StoreError) -> Response {
    failure("store_error", err.to_string())
}

pub fn token_error_to_response(err: TokenError) -> Response {
    failure("invalid_token", err.to_string())
}

pub fn user_error_to_response(err: UserError) -> Response {
    match err {
        UserError::Domain(e) => domain_error_to_response(e),
        UserError::Store(e) => store_error_to_response(e),
        UserError::Token(e) => {
            error!(error = %e, "token signing failed");
            failure("internal_error", "internal error")
        }
        UserError::Password(e) => {
            error!(error = %e, "password hashing failed");
            failure("internal_error", "internal error")
        }
    }
}

pub fn post_error_to_response(err: PostError) -> Response {
    match err {
        PostError::Domain(e) => domain_error_to_response(e),
        PostError::Store(e) => store_error_to_response(e),
    }
}
