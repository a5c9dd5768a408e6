//! Ledger entry repository.
//!
//! Incomes and expenses live in two tables with the same layout; every
//! query takes an [`EntryKind`] and dispatches to the matching entity.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::{expense, income};
use crate::errors::{AppError, AppResult};
use domain::{DateRange, EntryId, EntryKind, LedgerEntry, NewEntry};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Read access to ledger entries outside a transaction.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Entries owned by `user_id` dated within `range` (inclusive), ordered by id
    async fn list_between(
        &self,
        kind: EntryKind,
        user_id: Uuid,
        range: DateRange,
    ) -> AppResult<Vec<LedgerEntry>>;

    /// Every entry owned by `user_id`, ordered by id
    async fn list_all(&self, kind: EntryKind, user_id: Uuid) -> AppResult<Vec<LedgerEntry>>;
}

/// Concrete implementation of EntryRepository
pub struct EntryStore {
    db: DatabaseConnection,
}

impl EntryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EntryRepository for EntryStore {
    async fn list_between(
        &self,
        kind: EntryKind,
        user_id: Uuid,
        range: DateRange,
    ) -> AppResult<Vec<LedgerEntry>> {
        list(&self.db, kind, user_id, Some(range)).await
    }

    async fn list_all(&self, kind: EntryKind, user_id: Uuid) -> AppResult<Vec<LedgerEntry>> {
        list(&self.db, kind, user_id, None).await
    }
}

pub(crate) async fn list<C: ConnectionTrait>(
    conn: &C,
    kind: EntryKind,
    user_id: Uuid,
    range: Option<DateRange>,
) -> AppResult<Vec<LedgerEntry>> {
    // `from > to` matches nothing; skip the round trip.
    if let Some(range) = range {
        if range.from > range.to {
            return Ok(Vec::new());
        }
    }
    let bounds: Option<(NaiveDate, NaiveDate)> = range.map(|r| (r.from, r.to));

    let entries = match kind {
        EntryKind::Income => {
            let mut query = income::Entity::find().filter(income::Column::UserId.eq(user_id));
            if let Some((from, to)) = bounds {
                query = query.filter(income::Column::Date.between(from, to));
            }
            query
                .order_by_asc(income::Column::Id)
                .all(conn)
                .await
                .map_err(AppError::from)?
                .into_iter()
                .map(LedgerEntry::from)
                .collect()
        }
        EntryKind::Expense => {
            let mut query = expense::Entity::find().filter(expense::Column::UserId.eq(user_id));
            if let Some((from, to)) = bounds {
                query = query.filter(expense::Column::Date.between(from, to));
            }
            query
                .order_by_asc(expense::Column::Id)
                .all(conn)
                .await
                .map_err(AppError::from)?
                .into_iter()
                .map(LedgerEntry::from)
                .collect()
        }
    };

    Ok(entries)
}

pub(crate) async fn find<C: ConnectionTrait>(
    conn: &C,
    kind: EntryKind,
    id: EntryId,
) -> AppResult<Option<LedgerEntry>> {
    let entry = match kind {
        EntryKind::Income => income::Entity::find_by_id(id)
            .one(conn)
            .await?
            .map(LedgerEntry::from),
        EntryKind::Expense => expense::Entity::find_by_id(id)
            .one(conn)
            .await?
            .map(LedgerEntry::from),
    };
    Ok(entry)
}

pub(crate) async fn insert<C: ConnectionTrait>(
    conn: &C,
    kind: EntryKind,
    user_id: Uuid,
    entry: NewEntry,
) -> AppResult<EntryId> {
    let id = match kind {
        EntryKind::Income => {
            income::ActiveModel {
                user_id: Set(user_id),
                category: Set(entry.category),
                amount: Set(entry.minor_units),
                date: Set(entry.date),
                description: Set(entry.description),
                ..Default::default()
            }
            .insert(conn)
            .await?
            .id
        }
        EntryKind::Expense => {
            expense::ActiveModel {
                user_id: Set(user_id),
                category: Set(entry.category),
                amount: Set(entry.minor_units),
                date: Set(entry.date),
                description: Set(entry.description),
                ..Default::default()
            }
            .insert(conn)
            .await?
            .id
        }
    };
    Ok(id)
}

/// Delete by id; returns the number of rows removed.
pub(crate) async fn delete<C: ConnectionTrait>(
    conn: &C,
    kind: EntryKind,
    id: EntryId,
) -> AppResult<u64> {
    let result = match kind {
        EntryKind::Income => income::Entity::delete_by_id(id).exec(conn).await?,
        EntryKind::Expense => expense::Entity::delete_by_id(id).exec(conn).await?,
    };
    Ok(result.rows_affected)
}
