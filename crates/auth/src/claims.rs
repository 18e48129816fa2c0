use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use summer_core::UserId;

/// Lifetime of an issued token, in minutes. There is no refresh; clients log in again.
pub const TOKEN_TTL_MINUTES: i64 = 15;

pub fn token_ttl() -> Duration {
    Duration::minutes(TOKEN_TTL_MINUTES)
}

/// Claims carried by every issued token.
///
/// `iat`/`exp` are encoded as unix seconds, matching registered JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject: the authenticated user.
    pub user_id: UserId,

    /// Set on every token minted after a successful credential check.
    pub authorized: bool,

    #[serde(with = "chrono::serde::ts_seconds")]
    pub iat: DateTime<Utc>,

    #[serde(with = "chrono::serde::ts_seconds")]
    pub exp: DateTime<Utc>,
}

impl JwtClaims {
    /// Claims for a freshly authenticated user, valid for [`token_ttl`].
    pub fn for_user(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            authorized: true,
            iat: now,
            exp: now + token_ttl(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,

    #[error("token is not authorized")]
    NotAuthorized,
}

/// Deterministically validate decoded claims against `now`.
///
/// Signature and algorithm checks happen before this in [`crate::jwt`].
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if !claims.authorized {
        return Err(TokenValidationError::NotAuthorized);
    }
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}
