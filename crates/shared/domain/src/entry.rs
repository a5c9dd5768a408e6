//! Ledger entries: incomes and expenses.
//!
//! Both kinds share one shape and live in separate tables. An entry is
//! immutable once stored; the only mutation is deletion by its owner.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DATE_FORMAT;
use crate::error::{DomainError, DomainResult};
use crate::money::{from_minor_units, to_minor_units};

/// Storage-assigned entry identifier.
pub type EntryId = i64;

/// Which ledger an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored income or expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LedgerEntry {
    /// Entry identifier
    pub id: EntryId,
    /// Owning user (used for ownership checks only)
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    /// Free-text category
    pub category: String,
    /// Positive amount, two decimal places
    #[cfg_attr(feature = "openapi", schema(value_type = f64, example = 1000.0))]
    pub amount: Decimal,
    /// Calendar date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Optional free-text description
    pub description: String,
}

/// Validated input for a new entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub category: String,
    pub amount: Decimal,
    /// `amount` in minor units
    pub minor_units: i64,
    pub date: NaiveDate,
    pub description: String,
}

impl NewEntry {
    /// Validate raw entry fields.
    ///
    /// # Errors
    /// Returns a validation error for an empty category, a non-positive
    /// amount, an amount above the balance limit or with sub-cent digits,
    /// or a date that is not `YYYY-MM-DD`.
    pub fn new(
        category: impl Into<String>,
        amount: Decimal,
        date: &str,
        description: Option<String>,
    ) -> DomainResult<Self> {
        let category = category.into();
        if category.trim().is_empty() {
            return Err(DomainError::validation("Category is required"));
        }
        if amount <= Decimal::ZERO {
            return Err(DomainError::validation("Amount must be greater than zero"));
        }
        let minor_units = to_minor_units(amount)?;
        let date = parse_date(date)?;

        Ok(Self {
            category,
            amount: from_minor_units(minor_units),
            minor_units,
            date,
            description: description.unwrap_or_default(),
        })
    }
}

/// Inclusive date range for listing entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Parse both bounds. A range with `from > to` is valid and empty.
    pub fn parse(from: &str, to: &str) -> DomainResult<Self> {
        Ok(Self {
            from: parse_date(from)?,
            to: parse_date(to)?,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        DomainError::validation(format!("Invalid date '{}' (expected YYYY-MM-DD)", value))
    })
}
