//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
pub(crate) mod entry_repository;
pub(crate) mod user_repository;

pub use entry_repository::{EntryRepository, EntryStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use entry_repository::MockEntryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
