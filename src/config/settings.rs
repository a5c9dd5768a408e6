//! Application settings loaded from environment variables.

use std::env;
use std::time::Duration;

use domain::{DEFAULT_TOKEN_LIFETIME_HOURS, MIN_JWT_SECRET_LENGTH, SECONDS_PER_HOUR};
use thiserror::Error;

use super::constants::{
    DEFAULT_APP_ENV, DEFAULT_CORS_ALLOWED_ORIGINS, DEFAULT_DATABASE_URL, DEFAULT_GEMINI_MODEL,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEV_JWT_SECRET,
    JSON_LOG_ENVS,
};

/// Configuration loading failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("JWT_SECRET must be at least {0} characters long")]
    SecretTooShort(usize),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub app_env: String,
    pub database_url: String,
    jwt_secret: String,
    pub jwt_lifetime_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    pub request_timeout_secs: u64,
    pub cors_allowed_origins: Vec<String>,
    gemini_api_key: Option<String>,
    pub gemini_model: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("app_env", &self.app_env)
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_lifetime_hours", &self.jwt_lifetime_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("gemini_model", &self.gemini_model)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present).
    ///
    /// # Errors
    /// Fails if JWT_SECRET is missing in a release build, is too short, or a
    /// numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) => secret,
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            None => return Err(ConfigError::Missing("JWT_SECRET")),
        };

        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::SecretTooShort(MIN_JWT_SECRET_LENGTH));
        }

        let jwt_lifetime_hours = parse_or(&lookup, "JWT_LIFETIME_HOURS", DEFAULT_TOKEN_LIFETIME_HOURS)?;
        if jwt_lifetime_hours <= 0 {
            return Err(ConfigError::Invalid {
                name: "JWT_LIFETIME_HOURS",
                value: jwt_lifetime_hours.to_string(),
            });
        }

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            app_env: lookup("APP_ENV").unwrap_or_else(|| DEFAULT_APP_ENV.to_string()),
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            jwt_lifetime_hours,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_or(&lookup, "SERVER_PORT", DEFAULT_SERVER_PORT)?,
            request_timeout_secs: parse_or(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            cors_allowed_origins,
            gemini_api_key: lookup("GEMINI_API_KEY").filter(|key| !key.is_empty()),
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
        })
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Token lifetime as a duration.
    pub fn token_lifetime(&self) -> Duration {
        Duration::from_secs(self.jwt_lifetime_hours.unsigned_abs() * SECONDS_PER_HOUR as u64)
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini_api_key.as_deref()
    }

    /// Whether logs should be emitted as JSON.
    pub fn json_logs(&self) -> bool {
        JSON_LOG_ENVS.contains(&self.app_env.as_str())
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
