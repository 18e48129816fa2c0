use axum::{
    Form, Json, async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    response::Response,
};
use serde::{Deserialize, de::DeserializeOwned};

use summer_users::{NewUser, UserPatch};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignUpRequest {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl From<SignUpRequest> for NewUser {
    fn from(body: SignUpRequest) -> Self {
        Self {
            username: body.username,
            name: body.name,
            email: body.email,
            password: body.password,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Partial profile. Absent (or `null`) fields are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(body: UpdateUserRequest) -> Self {
        Self {
            username: body.username,
            name: body.name,
            email: body.email,
            password: body.password,
        }
    }
}

/// Only the caption is read; the owner always comes from the token.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreatePostRequest {
    pub caption: String,
}

// -------------------------
// Extractors
// -------------------------

/// `Json<T>` whose rejection is rendered in the error envelope.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| errors::malformed_body(e.body_text()))?;
        Ok(Self(body))
    }
}

/// Accepts either a JSON body or an urlencoded form, picked by `Content-Type`.
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(body) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| errors::malformed_body(e.body_text()))?;
            return Ok(Self(body));
        }

        let JsonBody(body) = JsonBody::<T>::from_request(req, state).await?;
        Ok(Self(body))
    }
}
