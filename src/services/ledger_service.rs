//! Ledger service - Income and expense entries with running balances.
//!
//! Every mutation touches two rows (the entry and the owner's balance)
//! and runs in one serializable transaction, so a user's balance always
//! equals the sum of the entries they own.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use domain::{max_balance, DateRange, EntryId, EntryKind, LedgerEntry, NewEntry};

/// Raw fields of an entry as received from a client.
#[derive(Debug, Clone)]
pub struct EntryInput {
    pub category: String,
    pub amount: Decimal,
    pub date: String,
    pub description: Option<String>,
}

/// Ledger service trait for dependency injection.
#[async_trait]
pub trait LedgerService: Send + Sync {
    /// Record an entry and add its amount to the matching balance.
    ///
    /// Fails with `InvalidInput` when the balance would pass [`max_balance`].
    async fn add_entry(&self, user_id: Uuid, kind: EntryKind, input: EntryInput)
        -> AppResult<EntryId>;

    /// The caller's entries dated within `[from, to]`, ordered by id
    async fn list_entries(
        &self,
        user_id: Uuid,
        kind: EntryKind,
        from: &str,
        to: &str,
    ) -> AppResult<Vec<LedgerEntry>>;

    /// Remove one of the caller's entries and subtract its amount
    async fn delete_entry(&self, user_id: Uuid, entry_id: EntryId, kind: EntryKind)
        -> AppResult<()>;
}

/// Concrete implementation of LedgerService using Unit of Work.
pub struct LedgerEngine<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> LedgerEngine<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> LedgerService for LedgerEngine<U> {
    async fn add_entry(
        &self,
        user_id: Uuid,
        kind: EntryKind,
        input: EntryInput,
    ) -> AppResult<EntryId> {
        let entry = NewEntry::new(input.category, input.amount, &input.date, input.description)?;
        let amount = entry.amount;

        let id = self
            .uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    let users = ctx.users();
                    let user = users.find_by_id(user_id).await?.ok_or_not_found()?;

                    let within_limit = user
                        .balance(kind)
                        .checked_add(amount)
                        .is_some_and(|total| total <= max_balance());
                    if !within_limit {
                        return Err(AppError::InvalidInput(format!(
                            "Balance limit exceeded: {} balance may not pass {}",
                            kind,
                            max_balance()
                        )));
                    }

                    users.adjust_balance(user_id, kind, amount).await?;
                    ctx.entries().insert(kind, user_id, entry).await
                })
            })
            .await?;

        tracing::info!(user_id = %user_id, entry_id = id, kind = %kind, amount = %amount, "Entry added");
        Ok(id)
    }

    async fn list_entries(
        &self,
        user_id: Uuid,
        kind: EntryKind,
        from: &str,
        to: &str,
    ) -> AppResult<Vec<LedgerEntry>> {
        let range = DateRange::parse(from, to)?;
        self.uow.entries().list_between(kind, user_id, range).await
    }

    async fn delete_entry(
        &self,
        user_id: Uuid,
        entry_id: EntryId,
        kind: EntryKind,
    ) -> AppResult<()> {
        let amount = self
            .uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    let entries = ctx.entries();
                    let entry = entries.find(kind, entry_id).await?.ok_or_not_found()?;

                    if entry.user_id != user_id {
                        tracing::warn!(
                            user_id = %user_id,
                            entry_id,
                            kind = %kind,
                            "Attempt to delete another user's entry"
                        );
                        return Err(AppError::Forbidden);
                    }

                    if entries.delete(kind, entry_id).await? == 0 {
                        return Err(AppError::NotFound);
                    }

                    ctx.users()
                        .adjust_balance(user_id, kind, -entry.amount)
                        .await?;
                    Ok(entry.amount)
                })
            })
            .await?;

        tracing::info!(user_id = %user_id, entry_id, kind = %kind, amount = %amount, "Entry deleted");
        Ok(())
    }
}
