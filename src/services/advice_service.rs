//! Advice service - Spending advice from an external text generator.

use async_trait::async_trait;
use std::fmt::Write;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::infra::{AdviceClient, UnitOfWork};
use domain::{EntryKind, LedgerEntry};

/// Advice service trait for dependency injection.
#[async_trait]
pub trait AdviceService: Send + Sync {
    /// Ask the provider where the caller could cut spending
    async fn advise(&self, user_id: Uuid) -> AppResult<String>;
}

/// Concrete implementation of AdviceService.
pub struct Advisor<U: UnitOfWork> {
    uow: Arc<U>,
    client: Arc<dyn AdviceClient>,
}

impl<U: UnitOfWork> Advisor<U> {
    pub fn new(uow: Arc<U>, client: Arc<dyn AdviceClient>) -> Self {
        Self { uow, client }
    }
}

#[async_trait]
impl<U: UnitOfWork> AdviceService for Advisor<U> {
    async fn advise(&self, user_id: Uuid) -> AppResult<String> {
        let expenses = self
            .uow
            .entries()
            .list_all(EntryKind::Expense, user_id)
            .await?;

        let advice = self.client.generate(build_prompt(&expenses)).await?;
        tracing::info!(user_id = %user_id, expenses = expenses.len(), "Advice generated");
        Ok(advice)
    }
}

/// One line per expense followed by the question.
pub fn build_prompt(expenses: &[LedgerEntry]) -> String {
    let mut prompt = String::from("Here is a list of my expenses:\n");
    for expense in expenses {
        let _ = writeln!(
            prompt,
            "{}: {:.2} ({})",
            expense.category, expense.amount, expense.description
        );
    }
    prompt.push_str(
        "\nBased on these expenses, which categories could I reduce spending in, \
         and how? Give short, practical advice.",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::infra::{MockAdviceClient, MockEntryRepository, MockUserRepository};
    use crate::services::test_support::TestUnitOfWork;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn expense(category: &str, amount: Decimal, description: &str) -> LedgerEntry {
        LedgerEntry {
            id: 1,
            user_id: Uuid::new_v4(),
            category: category.to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_prompt_lists_expenses() {
        let prompt = build_prompt(&[expense("food", dec!(50), "groceries"), expense("taxi", dec!(30), "")]);
        assert!(prompt.contains("food: 50.00 (groceries)\n"));
        assert!(prompt.contains("taxi: 30.00 ()\n"));
        assert!(prompt.contains("reduce spending"));
    }

    #[tokio::test]
    async fn test_advise_sends_prompt_to_client() {
        let user_id = Uuid::new_v4();
        let mut entries = MockEntryRepository::new();
        entries
            .expect_list_all()
            .withf(move |kind, uid| *kind == EntryKind::Expense && *uid == user_id)
            .returning(|_, _| Ok(vec![expense("food", dec!(50), "groceries")]));

        let mut client = MockAdviceClient::new();
        client
            .expect_generate()
            .withf(|prompt| prompt.contains("food: 50.00 (groceries)"))
            .times(1)
            .returning(|_| Ok("Cook at home.".to_string()));

        let uow = TestUnitOfWork::with_entries(MockUserRepository::new(), entries);
        let advisor = Advisor::new(Arc::new(uow), Arc::new(client));
        assert_eq!(advisor.advise(user_id).await.unwrap(), "Cook at home.");
    }

    #[tokio::test]
    async fn test_advise_propagates_upstream_failure() {
        let mut entries = MockEntryRepository::new();
        entries.expect_list_all().returning(|_, _| Ok(Vec::new()));
        let mut client = MockAdviceClient::new();
        client
            .expect_generate()
            .returning(|_| Err(AppError::upstream("503")));

        let uow = TestUnitOfWork::with_entries(MockUserRepository::new(), entries);
        let advisor = Advisor::new(Arc::new(uow), Arc::new(client));
        assert!(matches!(
            advisor.advise(Uuid::new_v4()).await,
            Err(AppError::Upstream(_))
        ));
    }
}
