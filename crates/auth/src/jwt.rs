//! HS256 bearer tokens.
//!
//! Verification pins the algorithm before touching the signature: a token whose
//! header names anything other than HS256 is rejected outright.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use summer_core::UserId;

use crate::claims::{JwtClaims, TokenValidationError, validate_claims};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("unexpected signing method: {0:?}")]
    UnexpectedAlgorithm(Algorithm),

    #[error("signature is invalid")]
    InvalidSignature,

    /// Decoding failed; carries the underlying parser message.
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Mints tokens for authenticated users.
pub trait JwtIssuer: Send + Sync {
    fn issue(&self, user_id: UserId, now: DateTime<Utc>) -> Result<String, TokenError>;
}

/// Verifies presented tokens and returns their claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError>;
}

/// Shared-secret HS256 issuer and validator.
#[derive(Clone)]
pub struct Hs256Jwt {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Hs256Jwt {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `validate_claims`.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        validation
    }
}

impl core::fmt::Debug for Hs256Jwt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256Jwt").finish_non_exhaustive()
    }
}

impl JwtIssuer for Hs256Jwt {
    fn issue(&self, user_id: UserId, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = JwtClaims::for_user(user_id, now);
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

impl JwtValidator for Hs256Jwt {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError> {
        let header =
            jsonwebtoken::decode_header(token).map_err(|e| TokenError::Malformed(e.to_string()))?;
        if header.alg != Algorithm::HS256 {
            return Err(TokenError::UnexpectedAlgorithm(header.alg));
        }

        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.decoding, &Self::validation())
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            })?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::claims::token_ttl;

    const SECRET: &str = "test-secret";

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn issued_token_decodes_to_its_subject() {
        let jwt = Hs256Jwt::new(SECRET);
        let token = jwt.issue(UserId::new(42), t0()).unwrap();

        let claims = jwt.validate(&token, t0() + Duration::seconds(1)).unwrap();
        assert_eq!(claims.user_id, UserId::new(42));
        assert!(claims.authorized);
        assert_eq!(claims.exp, t0() + token_ttl());
    }

    #[test]
    fn token_is_accepted_until_but_not_after_expiry() {
        let jwt = Hs256Jwt::new(SECRET);
        let token = jwt.issue(UserId::new(1), t0()).unwrap();

        assert!(jwt.validate(&token, t0() + Duration::seconds(14 * 60 + 59)).is_ok());
        assert_eq!(
            jwt.validate(&token, t0() + token_ttl()),
            Err(TokenError::Claims(TokenValidationError::Expired))
        );
        assert_eq!(
            jwt.validate(&token, t0() + Duration::hours(1)),
            Err(TokenError::Claims(TokenValidationError::Expired))
        );
    }

    #[test]
    fn rejects_token_signed_with_another_secret() {
        let token = Hs256Jwt::new("other-secret").issue(UserId::new(1), t0()).unwrap();
        assert_eq!(
            Hs256Jwt::new(SECRET).validate(&token, t0()),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn rejects_algorithm_substitution() {
        let claims = JwtClaims::for_user(UserId::new(1), t0());
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            Hs256Jwt::new(SECRET).validate(&token, t0()),
            Err(TokenError::UnexpectedAlgorithm(Algorithm::HS512))
        );
    }

    #[test]
    fn rejects_garbage() {
        let err = Hs256Jwt::new(SECRET).validate("not-a-token", t0()).unwrap_err();
        assert!(matches!(err, TokenError::Malformed(_)), "got {err:?}");
    }

    #[test]
    fn rejects_claims_without_authorized_flag() {
        let mut claims = JwtClaims::for_user(UserId::new(1), t0());
        claims.authorized = false;
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            Hs256Jwt::new(SECRET).validate(&token, t0()),
            Err(TokenError::Claims(TokenValidationError::NotAuthorized))
        );
    }
}
