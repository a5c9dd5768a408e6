//! Unit of Work pattern implementation.
//!
//! The Unit of Work:
//! - Centralizes access to the user and entry repositories
//! - Manages database transactions (begin, commit, rollback)
//! - Keeps entry rows and user balances consistent across statements

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseBackend, DatabaseConnection, DatabaseTransaction,
    IsolationLevel, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::{
    entry_repository, user_repository, EntryRepository, EntryStore, UserRepository, UserStore,
};
use crate::errors::AppResult;
use domain::{EntryId, EntryKind, LedgerEntry, NewEntry, User};

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly because of the generic transaction methods;
/// tests wrap the mock repositories in their own implementation.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get entry repository
    fn entries(&self) -> Arc<dyn EntryRepository>;

    /// Execute a closure within a transaction.
    ///
    /// Committed on success, rolled back on error. ReadCommitted isolation.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;

    /// Execute a closure within a transaction with serializable isolation.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get user repository for this transaction
    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository { txn: self.txn }
    }

    /// Get entry repository for this transaction
    pub fn entries(&self) -> TxEntryRepository<'_> {
        TxEntryRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    entry_repo: Arc<EntryStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserStore::new(db.clone()));
        let entry_repo = Arc::new(EntryStore::new(db.clone()));
        Self {
            db,
            user_repo,
            entry_repo,
        }
    }

    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // SQLite has one writer at a time and rejects isolation settings
        let txn = match self.db.get_database_backend() {
            DatabaseBackend::Sqlite => self.db.begin().await?,
            _ => {
                self.db
                    .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
                    .await?
            }
        };

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn entries(&self) -> Arc<dyn EntryRepository> {
        self.entry_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f).await
    }
}

/// Transaction-aware user repository.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        user_repository::find_by_id(self.txn, id).await
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        user_repository::find_by_username(self.txn, username).await
    }

    /// Create a new user; a taken username is `DuplicateUsername`.
    pub async fn create(&self, username: String, password_hash: String) -> AppResult<User> {
        user_repository::create(self.txn, username, password_hash).await
    }

    /// Add `delta` to the balance matching `kind` (`NotFound` if no such user).
    pub async fn adjust_balance(
        &self,
        id: Uuid,
        kind: EntryKind,
        delta: Decimal,
    ) -> AppResult<()> {
        user_repository::adjust_balance(self.txn, id, kind, delta).await
    }

    /// Replace the password hash if it is still `current_hash`
    /// (`InvalidCredentials` otherwise).
    pub async fn update_password(
        &self,
        id: Uuid,
        current_hash: &str,
        new_hash: String,
    ) -> AppResult<()> {
        user_repository::replace_password_hash(self.txn, id, current_hash, new_hash).await
    }
}

/// Transaction-aware entry repository.
pub struct TxEntryRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxEntryRepository<'a> {
    pub async fn find(&self, kind: EntryKind, id: EntryId) -> AppResult<Option<LedgerEntry>> {
        entry_repository::find(self.txn, kind, id).await
    }

    pub async fn insert(
        &self,
        kind: EntryKind,
        user_id: Uuid,
        entry: NewEntry,
    ) -> AppResult<EntryId> {
        entry_repository::insert(self.txn, kind, user_id, entry).await
    }

    /// Delete by id; returns the number of rows removed.
    pub async fn delete(&self, kind: EntryKind, id: EntryId) -> AppResult<u64> {
        entry_repository::delete(self.txn, kind, id).await
    }
}
