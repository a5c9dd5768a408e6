//! Test doubles shared by the service unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::infra::{
    EntryRepository, MockEntryRepository, MockUserRepository, TransactionContext, UnitOfWork,
    UserRepository,
};
use domain::User;

/// Unit of Work over mock repositories. Transactions are unsupported, so
/// transactional paths are covered by the SQLite-backed suites instead.
pub(crate) struct TestUnitOfWork {
    user_repo: Arc<MockUserRepository>,
    entry_repo: Arc<MockEntryRepository>,
}

impl TestUnitOfWork {
    pub(crate) fn new(user_repo: MockUserRepository) -> Self {
        Self::with_entries(user_repo, MockEntryRepository::new())
    }

    pub(crate) fn with_entries(
        user_repo: MockUserRepository,
        entry_repo: MockEntryRepository,
    ) -> Self {
        Self {
            user_repo: Arc::new(user_repo),
            entry_repo: Arc::new(entry_repo),
        }
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn entries(&self) -> Arc<dyn EntryRepository> {
        self.entry_repo.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }

    async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

pub(crate) fn test_user(id: Uuid, username: &str, password_hash: &str) -> User {
    User::new(id, username.to_string(), password_hash.to_string())
}
