//! `summer-auth`: token issuance/verification and password hashing.
//!
//! This crate is decoupled from HTTP and storage: callers hand it a secret, a
//! user id and the current time.

pub mod claims;
pub mod jwt;
pub mod password;

pub use claims::{JwtClaims, TOKEN_TTL_MINUTES, TokenValidationError, token_ttl, validate_claims};
pub use jwt::{Hs256Jwt, JwtIssuer, JwtValidator, TokenError};
pub use password::{Argon2Scheme, PasswordError, PasswordScheme, hash_password, verify_password};
