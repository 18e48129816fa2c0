use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::task::spawn_blocking;
use tracing::{info, warn};

use summer_auth::{JwtIssuer, PasswordError, PasswordScheme, TokenError};
use summer_core::{DomainError, StoreError, UserId};

use crate::repository::UserRepository;
use crate::user::{NewUser, User, UserPatch};

#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Registration, lookup, profile update and login.
///
/// Stateless apart from its collaborators; build one at startup and share it.
pub struct UserUseCase {
    repo: Arc<dyn UserRepository>,
    tokens: Arc<dyn JwtIssuer>,
    passwords: Arc<dyn PasswordScheme>,
}

impl UserUseCase {
    pub fn new(
        repo: Arc<dyn UserRepository>,
        tokens: Arc<dyn JwtIssuer>,
        passwords: Arc<dyn PasswordScheme>,
    ) -> Self {
        Self {
            repo,
            tokens,
            passwords,
        }
    }

    pub async fn register(&self, mut new_user: NewUser) -> Result<User, UserError> {
        new_user.validate()?;
        new_user.password = self.hash(std::mem::take(&mut new_user.password)).await?;

        let user = self.repo.create(new_user).await?;
        info!(user_id = %user.id, "user registered");
        Ok(user.sanitized())
    }

    pub async fn get_by_id(&self, id: UserId) -> Result<User, UserError> {
        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound)?;
        Ok(user.sanitized())
    }

    /// Update the caller's own profile. `caller` must come from a verified
    /// token, never from the request path or body.
    pub async fn update(&self, caller: UserId, patch: UserPatch) -> Result<User, UserError> {
        let mut user = self
            .repo
            .find_by_id(caller)
            .await?
            .ok_or(DomainError::NotFound)?;

        if patch.is_empty() {
            return Ok(user.sanitized());
        }

        patch.validate()?;
        patch.apply_profile(&mut user);
        if let Some(password) = patch.password {
            user.password = self.hash(password).await?;
        }

        let updated = self.repo.update(&user).await?;
        info!(user_id = %updated.id, "user profile updated");
        Ok(updated.sanitized())
    }

    /// Check credentials and mint a token. Unknown username and wrong password
    /// fail with the same [`DomainError::InvalidCredentials`], and both pay for
    /// one password verification.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<String, UserError> {
        let user = match self.repo.find_by_username(username).await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "login lookup failed");
                None
            }
        };

        let stored_hash = user.as_ref().map(|u| u.password.clone());
        let verified = self.verify(password.to_string(), stored_hash).await?;

        let user = match user {
            Some(user) if verified => user,
            Some(user) => {
                warn!(user_id = %user.id, "login rejected");
                return Err(DomainError::InvalidCredentials.into());
            }
            None => {
                warn!("login rejected");
                return Err(DomainError::InvalidCredentials.into());
            }
        };

        let token = self.tokens.issue(user.id, now)?;
        info!(user_id = %user.id, "login succeeded");
        Ok(token)
    }

    async fn hash(&self, password: String) -> Result<String, UserError> {
        let passwords = self.passwords.clone();
        let hashed = spawn_blocking(move || passwords.hash(&password))
            .await
            .map_err(|e| PasswordError::Task(e.to_string()))??;
        Ok(hashed)
    }

    /// `None` verifies against a throwaway hash and always fails.
    async fn verify(&self, password: String, hash: Option<String>) -> Result<bool, UserError> {
        let passwords = self.passwords.clone();
        let verified = spawn_blocking(move || match hash {
            Some(hash) => passwords.verify(&password, &hash),
            None => passwords.verify_dummy(&password),
        })
        .await
        .map_err(|e| PasswordError::Task(e.to_string()))?;
        Ok(verified)
    }
}
