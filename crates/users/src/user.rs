use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use summer_core::{DomainError, DomainResult, Entity, UserId};

pub const USERNAME_KEY: &str = "users_username_key";
pub const NAME_KEY: &str = "users_name_key";
pub const EMAIL_KEY: &str = "users_email_key";
pub const PASSWORD_KEY: &str = "users_password_key";

/// A stored account.
///
/// `password` holds the argon2 hash while inside the service. Everything
/// returned by [`crate::UserUseCase`] has it cleared, and an empty password is
/// omitted from JSON entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    pub follower_count: i32,
    pub following_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// The same record with the password cleared.
    pub fn sanitized(mut self) -> Self {
        self.password.clear();
        self
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

/// Registration input. `password` is plaintext until the use-case hashes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    /// Reports the first failing field, checked in the order
    /// username, name, email (presence, then format), password.
    pub fn validate(&self) -> DomainResult<()> {
        require(&self.username, USERNAME_KEY)?;
        require(&self.name, NAME_KEY)?;
        require(&self.email, EMAIL_KEY)?;
        if !is_valid_email(&self.email) {
            return Err(DomainError::invalid(EMAIL_KEY));
        }
        require(&self.password, PASSWORD_KEY)?;
        Ok(())
    }
}

/// Partial profile update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UserPatch {
    /// Applies the registration rules to the fields that are present.
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(username) = &self.username {
            require(username, USERNAME_KEY)?;
        }
        if let Some(name) = &self.name {
            require(name, NAME_KEY)?;
        }
        if let Some(email) = &self.email {
            require(email, EMAIL_KEY)?;
            if !is_valid_email(email) {
                return Err(DomainError::invalid(EMAIL_KEY));
            }
        }
        if let Some(password) = &self.password {
            require(password, PASSWORD_KEY)?;
        }
        Ok(())
    }

    /// Copies the present profile fields onto `user`. The password is not
    /// touched here; it must be hashed first.
    pub fn apply_profile(&self, user: &mut User) {
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

fn require(value: &str, field: &'static str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::missing(field));
    }
    Ok(())
}

fn email_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("email regex should compile")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}
