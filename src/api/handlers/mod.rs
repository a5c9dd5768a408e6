//! HTTP request handlers.

pub mod advice_handler;
pub mod auth_handler;
pub mod ledger_handler;
pub mod user_handler;

pub use advice_handler::advice_routes;
pub use auth_handler::{account_routes, auth_routes};
pub use ledger_handler::ledger_routes;
pub use user_handler::user_routes;
