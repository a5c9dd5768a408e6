//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - Unit of Work for transaction management
//! - The HTTP client of the advice provider

pub mod advice_client;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use advice_client::{AdviceClient, GeminiClient};
pub use db::{Database, Migrator};
pub use repositories::{EntryRepository, EntryStore, UserRepository, UserStore};
pub use unit_of_work::{
    Persistence, TransactionContext, TxEntryRepository, TxUserRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use advice_client::MockAdviceClient;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockEntryRepository, MockUserRepository};
