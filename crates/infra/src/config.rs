//! Process configuration, read from the environment.
//!
//! | Variable | Required | Default |
//! |---|---|---|
//! | `DB_CONNECTION_STRING` | yes | |
//! | `SECRET_JWT_KEY` | no (warns) | insecure dev secret |
//! | `BIND_ADDR` | no | `0.0.0.0:8000` |
//! | `DB_MAX_CONNECTIONS` | no | `5` |

use std::net::SocketAddr;

use thiserror::Error;

pub const DB_CONNECTION_STRING: &str = "DB_CONNECTION_STRING";
pub const SECRET_JWT_KEY: &str = "SECRET_JWT_KEY";
pub const BIND_ADDR: &str = "BIND_ADDR";
pub const DB_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
    pub db_max_connections: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get(DB_CONNECTION_STRING).ok_or(ConfigError::Missing(DB_CONNECTION_STRING))?;

        let jwt_secret = get(SECRET_JWT_KEY).unwrap_or_else(|| {
            tracing::warn!("{SECRET_JWT_KEY} not set; using insecure dev default");
            DEV_JWT_SECRET.to_string()
        });

        let bind_addr = get(BIND_ADDR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: BIND_ADDR,
                message: e.to_string(),
            })?;

        let db_max_connections = match get(DB_MAX_CONNECTIONS) {
            Some(raw) => raw.parse::<u32>().map_err(|e| ConfigError::Invalid {
                key: DB_MAX_CONNECTIONS,
                message: e.to_string(),
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            db_max_connections,
        })
    }
}

impl core::fmt::Debug for Settings {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Settings")
            .field("database_url", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .field("bind_addr", &self.bind_addr)
            .field("db_max_connections", &self.db_max_connections)
            .finish()
    }
}
