//! Token service - Issues and verifies signed bearer tokens.
//!
//! Tokens are HS256 JWTs carrying the user id in `sub`. Only HS256 is
//! accepted on verification. Expiry is checked here rather than by
//! `jsonwebtoken` so that it is exact: a token is expired from the
//! second `now >= exp` holds, with no leeway.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

/// Token verification failures
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Undecodable, badly signed, wrong algorithm or missing claims
    #[error("malformed token")]
    Malformed,

    #[error("token expired")]
    Expired,
}

/// Signs and verifies access tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &[u8], lifetime: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256];
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            lifetime,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.jwt_secret_bytes(), config.token_lifetime())
    }

    /// Default lifetime of issued tokens.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for `user_id` expiring `lifetime` from now.
    pub fn issue(&self, user_id: Uuid, lifetime: Duration) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let lifetime_secs = i64::try_from(lifetime.as_secs())
            .map_err(|_| AppError::internal("token lifetime out of range"))?;

        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now.saturating_add(lifetime_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::internal(format!("token signing failed: {}", e)))
    }

    /// Verify a token against the current time and return its subject.
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as of `now` (unix seconds).
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Uuid, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| TokenError::Malformed)?;

        if now >= data.claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(data.claims.sub)
    }
}
