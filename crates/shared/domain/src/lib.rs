//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! users, ledger entries, password hashing and the validation rules that
//! apply before anything reaches storage.

pub mod constants;
pub mod entry;
pub mod error;
pub mod money;
pub mod password;
pub mod user;

pub use constants::*;
pub use entry::{parse_date, DateRange, EntryId, EntryKind, LedgerEntry, NewEntry};
pub use error::{DomainError, DomainResult};
pub use money::{from_minor_units, max_balance, to_minor_units};
pub use password::Password;
pub use user::{validate_username, PersonName, User, UserView};
