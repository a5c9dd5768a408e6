//! Bearer-token authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::errors::AppError;
use crate::services::authenticate;

/// Authenticated caller, inserted as a request extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
}

/// Resolves the caller from the Authorization header and injects
/// [`CurrentUser`] into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let id = authenticate(&state.services.tokens(), header)?;
    request.extensions_mut().insert(CurrentUser { id });

    Ok(next.run(request).await)
}
