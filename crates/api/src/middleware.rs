use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::warn;

use summer_auth::JwtValidator;

use crate::app::errors;
use crate::context::AuthenticatedUser;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

/// Gate for protected routes.
///
/// A missing token is a 401. A token that fails verification is reported as a
/// 500 carrying the verification message. Either way the handler never runs.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token(req.headers()).ok_or_else(|| {
        errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "not authorized")
    })?;

    let claims = state.jwt.validate(token, Utc::now()).map_err(|e| {
        warn!(error = %e, "bearer token rejected");
        errors::token_error_to_response(e)
    })?;

    req.extensions_mut()
        .insert(AuthenticatedUser::new(claims.user_id));

    Ok(next.run(req).await)
}

/// The header carries the raw token; a `Bearer ` prefix is accepted too.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    // A bare `Bearer` scheme carries no token.
    let token = match raw.strip_prefix("Bearer") {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => raw,
    };

    if token.is_empty() {
        return None;
    }

    Some(token)
}
