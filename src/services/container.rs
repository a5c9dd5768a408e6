//! Service Container - Centralized service access.
//!
//! Handlers depend on the `ServiceContainer` trait, not on concrete
//! services, so tests can swap any of them.

use std::sync::Arc;

use super::{
    AdviceService, Advisor, AuthService, Authenticator, LedgerEngine, LedgerService,
    ProfileManager, ProfileService, TokenService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{AdviceClient, GeminiClient, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get ledger service
    fn ledger(&self) -> Arc<dyn LedgerService>;

    /// Get profile service
    fn profiles(&self) -> Arc<dyn ProfileService>;

    /// Get advice service
    fn advice(&self) -> Arc<dyn AdviceService>;

    /// Token verifier used by the session gate
    fn tokens(&self) -> TokenService;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    ledger_service: Arc<dyn LedgerService>,
    profile_service: Arc<dyn ProfileService>,
    advice_service: Arc<dyn AdviceService>,
    tokens: TokenService,
}

impl Services {
    /// Wire every service over one persistence handle.
    pub fn new(
        uow: Arc<Persistence>,
        tokens: TokenService,
        advice_client: Arc<dyn AdviceClient>,
    ) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), tokens.clone())),
            ledger_service: Arc::new(LedgerEngine::new(uow.clone())),
            profile_service: Arc::new(ProfileManager::new(uow.clone())),
            advice_service: Arc::new(Advisor::new(uow, advice_client)),
            tokens,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> AppResult<Self> {
        let uow = Arc::new(Persistence::new(db));
        let advice_client = Arc::new(GeminiClient::from_config(config)?);
        if config.gemini_api_key().is_none() {
            tracing::warn!("GEMINI_API_KEY not set, advice requests will fail");
        }

        Ok(Self::new(uow, TokenService::from_config(config), advice_client))
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn ledger(&self) -> Arc<dyn LedgerService> {
        self.ledger_service.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileService> {
        self.profile_service.clone()
    }

    fn advice(&self) -> Arc<dyn AdviceService> {
        self.advice_service.clone()
    }

    fn tokens(&self) -> TokenService {
        self.tokens.clone()
    }
}
