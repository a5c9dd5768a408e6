//! User domain entity and related types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::MIN_USERNAME_LENGTH;
use crate::entry::EntryKind;
use crate::error::{DomainError, DomainResult};

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub registered_at: DateTime<Utc>,
    pub first_name: String,
    pub second_name: String,
    /// Sum of the amounts of all income entries the user owns
    pub incomes_balance: Decimal,
    /// Sum of the amounts of all expense entries the user owns
    pub expenses_balance: Decimal,
}

impl User {
    /// Create a freshly registered user: empty names, zero balances.
    pub fn new(id: Uuid, username: String, password_hash: String) -> Self {
        Self {
            id,
            username,
            password_hash,
            registered_at: Utc::now(),
            first_name: String::new(),
            second_name: String::new(),
            incomes_balance: Decimal::ZERO,
            expenses_balance: Decimal::ZERO,
        }
    }

    /// Balance maintained for the given entry kind.
    pub fn balance(&self, kind: EntryKind) -> Decimal {
        match kind {
            EntryKind::Income => self.incomes_balance,
            EntryKind::Expense => self.expenses_balance,
        }
    }
}

/// Validate a username supplied at registration or login.
pub fn validate_username(username: &str) -> DomainResult<()> {
    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(DomainError::validation("Username is required"));
    }
    Ok(())
}

/// First and second name pair, both required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    first: String,
    second: String,
}

impl PersonName {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> DomainResult<Self> {
        let first = first.into();
        let second = second.into();
        if first.is_empty() || second.is_empty() {
            return Err(DomainError::validation(
                "Both first_name and second_name are required",
            ));
        }
        Ok(Self { first, second })
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn into_parts(self) -> (String, String) {
        (self.first, self.second)
    }
}

/// User profile view (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserView {
    /// Unique user identifier
    pub uid: Uuid,
    /// Login name
    pub username: String,
    /// First name (empty until set)
    pub first_name: String,
    /// Second name (empty until set)
    pub second_name: String,
    /// Running total of income entries
    #[cfg_attr(feature = "openapi", schema(value_type = f64, example = 1000.0))]
    pub incomes_balance: Decimal,
    /// Running total of expense entries
    #[cfg_attr(feature = "openapi", schema(value_type = f64, example = 80.0))]
    pub expenses_balance: Decimal,
    /// Registration timestamp
    pub registered_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            uid: user.id,
            username: user.username,
            first_name: user.first_name,
            second_name: user.second_name,
            incomes_balance: user.incomes_balance,
            expenses_balance: user.expenses_balance,
            registered_at: user.registered_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_user_starts_empty() {
        let user = User::new(Uuid::new_v4(), "alice".to_string(), "hash".to_string());
        assert_eq!(user.incomes_balance, Decimal::ZERO);
        assert_eq!(user.expenses_balance, Decimal::ZERO);
        assert!(user.first_name.is_empty());
        assert!(user.second_name.is_empty());
    }

    #[test]
    fn test_balance_by_kind() {
        let mut user = User::new(Uuid::new_v4(), "alice".to_string(), "hash".to_string());
        user.incomes_balance = dec!(1000);
        user.expenses_balance = dec!(80);
        assert_eq!(user.balance(EntryKind::Income), dec!(1000));
        assert_eq!(user.balance(EntryKind::Expense), dec!(80));
    }

    #[test]
    fn test_person_name_requires_both_parts() {
        assert!(PersonName::new("John", "").is_err());
        assert!(PersonName::new("", "Doe").is_err());
        let name = PersonName::new("John", "Doe").unwrap();
        assert_eq!(name.first(), "John");
        assert_eq!(name.second(), "Doe");
    }

    #[test]
    fn test_username_validation() {
        assert!(validate_username("").is_err());
        assert!(validate_username("alice").is_ok());
    }

    #[test]
    fn test_view_from_user() {
        let mut user = User::new(Uuid::new_v4(), "alice".to_string(), "secret-hash".to_string());
        user.incomes_balance = dec!(1000);
        let view = UserView::from(user.clone());
        assert_eq!(view.uid, user.id);
        assert_eq!(view.username, "alice");
        assert_eq!(view.incomes_balance, dec!(1000));
        assert_eq!(view.registered_at, user.registered_at);
    }
}
