//! Session gate: turns an `Authorization` header into a user id.

use domain::BEARER_TOKEN_PREFIX;
use uuid::Uuid;

use super::TokenService;
use crate::errors::{AppError, AppResult};

/// Resolve the caller of a protected operation.
///
/// Every failure (missing header, wrong scheme, bad or expired token) is
/// `Unauthenticated`; the cause is only logged.
pub fn authenticate(tokens: &TokenService, authorization: Option<&str>) -> AppResult<Uuid> {
    let header = authorization.ok_or(AppError::Unauthenticated)?;

    let token = header.strip_prefix(BEARER_TOKEN_PREFIX).ok_or_else(|| {
        tracing::debug!("Authorization header without bearer scheme");
        AppError::Unauthenticated
    })?;

    tokens.verify(token.trim()).map_err(|e| {
        tracing::warn!(reason = %e, "Rejected access token");
        AppError::from(e)
    })
}
