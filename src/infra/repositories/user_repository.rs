//! User repository implementation.
//!
//! Queries are written once against [`ConnectionTrait`] so the pooled
//! store and the transaction-scoped repository share them.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::errors::{AppError, AppResult};
use domain::{to_minor_units, EntryKind, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by exact (case-sensitive) username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Create a new user with empty names and zero balances
    async fn create(&self, username: String, password_hash: String) -> AppResult<User>;

    /// Overwrite both names
    async fn update_names(&self, id: Uuid, first_name: String, second_name: String)
        -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        find_by_id(&self.db, id).await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        find_by_username(&self.db, username).await
    }

    async fn create(&self, username: String, password_hash: String) -> AppResult<User> {
        create(&self.db, username, password_hash).await
    }

    async fn update_names(
        &self,
        id: Uuid,
        first_name: String,
        second_name: String,
    ) -> AppResult<()> {
        update_names(&self.db, id, first_name, second_name).await
    }
}

pub(crate) async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<Option<User>> {
    let result = UserEntity::find_by_id(id)
        .one(conn)
        .await
        .map_err(AppError::from)?;

    Ok(result.map(User::from))
}

pub(crate) async fn find_by_username<C: ConnectionTrait>(
    conn: &C,
    username: &str,
) -> AppResult<Option<User>> {
    let result = UserEntity::find()
        .filter(user::Column::Username.eq(username))
        .one(conn)
        .await
        .map_err(AppError::from)?;

    Ok(result.map(User::from))
}

pub(crate) async fn create<C: ConnectionTrait>(
    conn: &C,
    username: String,
    password_hash: String,
) -> AppResult<User> {
    let user = User::new(Uuid::new_v4(), username, password_hash);
    let active_model = ActiveModel {
        id: Set(user.id),
        username: Set(user.username.clone()),
        password_hash: Set(user.password_hash.clone()),
        registered_at: Set(user.registered_at),
        first_name: Set(user.first_name.clone()),
        second_name: Set(user.second_name.clone()),
        incomes_balance: Set(0),
        expenses_balance: Set(0),
    };

    let model = active_model.insert(conn).await.map_err(map_unique_violation)?;
    Ok(User::from(model))
}

pub(crate) async fn update_names<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    first_name: String,
    second_name: String,
) -> AppResult<()> {
    let result = UserEntity::update_many()
        .col_expr(user::Column::FirstName, Expr::value(first_name))
        .col_expr(user::Column::SecondName, Expr::value(second_name))
        .filter(user::Column::Id.eq(id))
        .exec(conn)
        .await
        .map_err(AppError::from)?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Swap the password hash only if it still equals `current_hash`.
///
/// Zero rows means another change landed first and the caller's
/// credentials are stale.
pub(crate) async fn replace_password_hash<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    current_hash: &str,
    new_hash: String,
) -> AppResult<()> {
    let result = UserEntity::update_many()
        .col_expr(user::Column::PasswordHash, Expr::value(new_hash))
        .filter(user::Column::Id.eq(id))
        .filter(user::Column::PasswordHash.eq(current_hash))
        .exec(conn)
        .await
        .map_err(AppError::from)?;

    if result.rows_affected == 0 {
        return Err(AppError::InvalidCredentials);
    }
    Ok(())
}

/// Add `delta` to the balance column matching `kind`.
///
/// Runs as a single `UPDATE ... SET col = col + delta` on integer minor
/// units so concurrent writers never read-modify-write a stale value.
pub(crate) async fn adjust_balance<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    kind: EntryKind,
    delta: Decimal,
) -> AppResult<()> {
    let delta = to_minor_units(delta)?;
    let column = match kind {
        EntryKind::Income => user::Column::IncomesBalance,
        EntryKind::Expense => user::Column::ExpensesBalance,
    };

    let result = UserEntity::update_many()
        .col_expr(column, Expr::col(column).add(delta))
        .filter(user::Column::Id.eq(id))
        .exec(conn)
        .await
        .map_err(AppError::from)?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

fn map_unique_violation(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateUsername,
        _ => AppError::from(err),
    }
}
