//! OpenAPI document served at `/api-docs/openapi.json`, browsable at `/swagger`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{advice_handler, auth_handler, ledger_handler, user_handler};
use crate::services::TokenResponse;
use crate::types::{AdviceResponse, EntryCreated, MessageResponse, Registered};
use domain::{LedgerEntry, UserView};

/// OpenAPI documentation for the TBank API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "TBank API",
        version = "0.1.0",
        description = "Personal finance backend: accounts, incomes, expenses and running balances",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://127.0.0.1:8443", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::change_password,
        // Ledger endpoints
        ledger_handler::add_income,
        ledger_handler::list_income,
        ledger_handler::delete_income,
        ledger_handler::add_expense,
        ledger_handler::list_expense,
        ledger_handler::delete_expense,
        // Profile endpoints
        user_handler::get_profile,
        user_handler::update_names,
        // Advice
        advice_handler::get_advice,
    ),
    components(
        schemas(
            // Domain types
            LedgerEntry,
            UserView,
            // Request types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::ChangePasswordRequest,
            ledger_handler::EntryRequest,
            user_handler::UpdateNamesRequest,
            // Response types
            TokenResponse,
            Registered,
            EntryCreated,
            MessageResponse,
            AdviceResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and password change"),
        (name = "Ledger", description = "Income and expense entries"),
        (name = "Users", description = "Profile and balances"),
        (name = "Advice", description = "Spending advice")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/login"))
                        .build(),
                ),
            );
        }
    }
}
