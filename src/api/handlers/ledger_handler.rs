//! Income and expense handlers.
//!
//! Both ledgers expose the same three operations; each route is a thin
//! wrapper that fixes the entry kind.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, post},
    Extension, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::EntryInput;
use crate::types::{Created, EntryCreated, MessageResponse};
use domain::{EntryId, EntryKind, LedgerEntry};

/// New income or expense
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EntryRequest {
    #[validate(length(min = 1, message = "category is required"))]
    #[schema(example = "salary")]
    pub category: String,
    /// Positive amount, at most two decimal places
    #[schema(value_type = f64, example = 1000.0)]
    pub amount: Decimal,
    /// Calendar date, YYYY-MM-DD
    #[schema(example = "2024-01-01")]
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<EntryRequest> for EntryInput {
    fn from(request: EntryRequest) -> Self {
        EntryInput {
            category: request.category,
            amount: request.amount,
            date: request.date,
            description: request.description,
        }
    }
}

/// Inclusive date range of a listing
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RangeQuery {
    /// First day, YYYY-MM-DD
    pub from: Option<String>,
    /// Last day, YYYY-MM-DD
    pub to: Option<String>,
}

/// Income and expense routes (protected)
pub fn ledger_routes() -> Router<AppState> {
    Router::new()
        .route("/income", post(add_income).get(list_income))
        .route("/income/:id", delete(delete_income))
        .route("/expense", post(add_expense).get(list_expense))
        .route("/expense/:id", delete(delete_expense))
}

async fn add(
    state: AppState,
    user: CurrentUser,
    kind: EntryKind,
    request: EntryRequest,
) -> AppResult<Created<EntryCreated>> {
    let id = state
        .services
        .ledger()
        .add_entry(user.id, kind, request.into())
        .await?;
    Ok(Created(EntryCreated { id }))
}

async fn list(
    state: AppState,
    user: CurrentUser,
    kind: EntryKind,
    range: RangeQuery,
) -> AppResult<Json<Vec<LedgerEntry>>> {
    let entries = state
        .services
        .ledger()
        .list_entries(
            user.id,
            kind,
            range.from.as_deref().unwrap_or_default(),
            range.to.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Json(entries))
}

async fn remove(
    state: AppState,
    user: CurrentUser,
    kind: EntryKind,
    id: EntryId,
) -> AppResult<Json<MessageResponse>> {
    state.services.ledger().delete_entry(user.id, id, kind).await?;
    Ok(Json(MessageResponse::new(format!("{} deleted", capitalize(kind.as_str())))))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Record an income
#[utoipa::path(
    post,
    path = "/api/income",
    tag = "Ledger",
    request_body = EntryRequest,
    responses(
        (status = 201, description = "Income recorded", body = EntryCreated),
        (status = 400, description = "Invalid category, amount or date"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_income(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(request): ValidatedJson<EntryRequest>,
) -> AppResult<Created<EntryCreated>> {
    add(state, user, EntryKind::Income, request).await
}

/// List incomes within a date range
#[utoipa::path(
    get,
    path = "/api/income",
    tag = "Ledger",
    params(RangeQuery),
    responses(
        (status = 200, description = "Incomes ordered by id", body = [LedgerEntry]),
        (status = 400, description = "Invalid date"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_income(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(range): Query<RangeQuery>,
) -> AppResult<Json<Vec<LedgerEntry>>> {
    list(state, user, EntryKind::Income, range).await
}

/// Delete one of the caller's incomes
#[utoipa::path(
    delete,
    path = "/api/income/{id}",
    tag = "Ledger",
    params(("id" = i64, Path, description = "Income id")),
    responses(
        (status = 200, description = "Income deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Income belongs to another user"),
        (status = 404, description = "Income not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_income(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<EntryId>,
) -> AppResult<Json<MessageResponse>> {
    remove(state, user, EntryKind::Income, id).await
}

/// Record an expense
#[utoipa::path(
    post,
    path = "/api/expense",
    tag = "Ledger",
    request_body = EntryRequest,
    responses(
        (status = 201, description = "Expense recorded", body = EntryCreated),
        (status = 400, description = "Invalid category, amount or date"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_expense(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(request): ValidatedJson<EntryRequest>,
) -> AppResult<Created<EntryCreated>> {
    add(state, user, EntryKind::Expense, request).await
}

/// List expenses within a date range
#[utoipa::path(
    get,
    path = "/api/expense",
    tag = "Ledger",
    params(RangeQuery),
    responses(
        (status = 200, description = "Expenses ordered by id", body = [LedgerEntry]),
        (status = 400, description = "Invalid date"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_expense(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(range): Query<RangeQuery>,
) -> AppResult<Json<Vec<LedgerEntry>>> {
    list(state, user, EntryKind::Expense, range).await
}

/// Delete one of the caller's expenses
#[utoipa::path(
    delete,
    path = "/api/expense/{id}",
    tag = "Ledger",
    params(("id" = i64, Path, description = "Expense id")),
    responses(
        (status = 200, description = "Expense deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Expense belongs to another user"),
        (status = 404, description = "Expense not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_expense(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<EntryId>,
) -> AppResult<Json<MessageResponse>> {
    remove(state, user, EntryKind::Expense, id).await
}
