//! Profile service - Names and account summary of the caller.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use domain::{PersonName, UserView};

/// Profile service trait for dependency injection.
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Overwrite first and second name; both are required
    async fn update_names(&self, user_id: Uuid, first_name: String, second_name: String)
        -> AppResult<()>;

    /// Id, username, names, balances and registration time
    async fn get_profile(&self, user_id: Uuid) -> AppResult<UserView>;
}

/// Concrete implementation of ProfileService using Unit of Work.
pub struct ProfileManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProfileManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ProfileService for ProfileManager<U> {
    async fn update_names(
        &self,
        user_id: Uuid,
        first_name: String,
        second_name: String,
    ) -> AppResult<()> {
        let (first, second) = PersonName::new(first_name, second_name)?.into_parts();
        self.uow.users().update_names(user_id, first, second).await?;

        tracing::info!(user_id = %user_id, "Names updated");
        Ok(())
    }

    async fn get_profile(&self, user_id: Uuid) -> AppResult<UserView> {
        self.uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found()
            .map(UserView::from)
    }
}
