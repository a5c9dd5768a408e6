//! Spending advice handler.

use axum::{extract::State, response::Json, routing::get, Extension, Router};

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::types::AdviceResponse;

/// Advice routes (protected)
pub fn advice_routes() -> Router<AppState> {
    Router::new().route("/ai-advice", get(get_advice))
}

/// Ask the text generator where the caller could cut spending
#[utoipa::path(
    get,
    path = "/api/ai-advice",
    tag = "Advice",
    responses(
        (status = 200, description = "Generated advice", body = AdviceResponse),
        (status = 401, description = "Not authenticated"),
        (status = 502, description = "Advice provider unavailable")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_advice(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<AdviceResponse>> {
    let advice = state.services.advice().advise(current_user.id).await?;
    Ok(Json(AdviceResponse { advice }))
}
