//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

mod advice_service;
pub mod auth_gate;
mod auth_service;
pub mod container;
mod ledger_service;
mod profile_service;
mod token_service;

#[cfg(test)]
pub(crate) mod test_support;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use advice_service::{build_prompt, AdviceService, Advisor};
pub use auth_gate::authenticate;
pub use auth_service::{AuthService, Authenticator, TokenResponse};
pub use ledger_service::{EntryInput, LedgerEngine, LedgerService};
pub use profile_service::{ProfileManager, ProfileService};
pub use token_service::{Claims, TokenError, TokenService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
