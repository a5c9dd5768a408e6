//! Profile handlers.

use axum::{extract::State, response::Json, routing::get, Extension, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::types::MessageResponse;
use domain::UserView;

/// Names update request; both fields are required
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateNamesRequest {
    #[validate(length(min = 1, message = "first_name is required"))]
    #[schema(example = "John")]
    pub first_name: String,
    #[validate(length(min = 1, message = "second_name is required"))]
    #[schema(example = "Doe")]
    pub second_name: String,
}

/// Profile routes (protected)
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", get(get_profile).put(update_names))
}

/// Get the caller's profile
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "Profile with balances", body = UserView),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserView>> {
    let profile = state.services.profiles().get_profile(current_user.id).await?;
    Ok(Json(profile))
}

/// Set the caller's first and second name
#[utoipa::path(
    put,
    path = "/api/users",
    tag = "Users",
    request_body = UpdateNamesRequest,
    responses(
        (status = 200, description = "Names updated", body = MessageResponse),
        (status = 400, description = "Missing name"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_names(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateNamesRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .profiles()
        .update_names(current_user.id, payload.first_name, payload.second_name)
        .await?;

    Ok(Json(MessageResponse::new("Names updated")))
}
