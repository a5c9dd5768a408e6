//! Authentication service - Credential store and login.
//!
//! Passwords are hashed with the domain `Password` value object; only the
//! hash is ever persisted. Registration and password changes run inside a
//! transaction.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use super::TokenService;
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use domain::{validate_username, Password, TOKEN_TYPE_BEARER};

/// Hash verified when the username is unknown, so both paths cost one
/// Argon2 verification.
static DUMMY_PASSWORD: Lazy<Option<Password>> =
    Lazy::new(|| Password::new("dummy-password-for-timing").ok());

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 43200)]
    pub expires_in: i64,
    /// Authenticated user id
    pub uid: Uuid,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and return its id
    async fn register(&self, username: String, password: String) -> AppResult<Uuid>;

    /// Check a username/password pair and return the user id
    async fn verify_credentials(&self, username: &str, password: &str) -> AppResult<Uuid>;

    /// Replace the caller's password after checking the old one
    async fn change_password(&self, user_id: Uuid, old: String, new: String) -> AppResult<()>;

    /// Verify credentials and issue an access token
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    tokens: TokenService,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, tokens: TokenService) -> Self {
        Self { uow, tokens }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, username: String, password: String) -> AppResult<Uuid> {
        validate_username(&username)?;
        let password_hash = Password::new(&password)?.into_string();

        let user = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let users = ctx.users();
                    if users.find_by_username(&username).await?.is_some() {
                        return Err(AppError::DuplicateUsername);
                    }
                    users.create(username, password_hash).await
                })
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user.id)
    }

    async fn verify_credentials(&self, username: &str, password: &str) -> AppResult<Uuid> {
        let Some(user) = self.uow.users().find_by_username(username).await? else {
            if let Some(dummy) = DUMMY_PASSWORD.as_ref() {
                let _ = dummy.verify(password);
            }
            return Err(AppError::NotFound);
        };

        if !Password::from_hash(user.password_hash).verify(password) {
            return Err(AppError::InvalidCredentials);
        }
        Ok(user.id)
    }

    async fn change_password(&self, user_id: Uuid, old: String, new: String) -> AppResult<()> {
        self.uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let users = ctx.users();
                    let user = users.find_by_id(user_id).await?.ok_or_not_found()?;
                    let current = Password::from_hash(user.password_hash);

                    if !current.verify(&old) {
                        tracing::warn!(
                            user_id = %user_id,
                            "Password change with wrong current password"
                        );
                        return Err(AppError::InvalidCredentials);
                    }

                    let password_hash = Password::new(&new)?.into_string();
                    // A concurrent change since the read leaves zero rows
                    users
                        .update_password(user_id, current.as_str(), password_hash)
                        .await
                })
            })
            .await?;

        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let user_id = match self.verify_credentials(&username, &password).await {
            Ok(id) => id,
            Err(AppError::NotFound | AppError::InvalidCredentials) => {
                return Err(AppError::InvalidCredentials)
            }
            Err(e) => return Err(e),
        };

        let lifetime = self.tokens.lifetime();
        let access_token = self.tokens.issue(user_id, lifetime)?;

        tracing::info!(user_id = %user_id, "User logged in");
        Ok(TokenResponse {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: i64::try_from(lifetime.as_secs()).unwrap_or(i64::MAX),
            uid: user_id,
        })
    }
}
