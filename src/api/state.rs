//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// All application services
    pub services: Arc<dyn ServiceContainer>,
    /// Database handle (health checks)
    pub database: Arc<Database>,
}

impl AppState {
    /// Build state with the production service container.
    pub fn from_config(database: Arc<Database>, config: &Config) -> AppResult<Self> {
        let services = Services::from_connection(database.get_connection(), config)?;
        Ok(Self::new(Arc::new(services), database))
    }

    /// Build state around an existing container.
    pub fn new(services: Arc<dyn ServiceContainer>, database: Arc<Database>) -> Self {
        Self { services, database }
    }
}
