//! Shared fixtures for the integration suites.
//!
//! Every suite runs against a fresh in-memory SQLite database with the real
//! migrations applied.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use tbank_api::errors::{AppError, AppResult};
use tbank_api::infra::{AdviceClient, Database, Persistence};
use tbank_api::services::TokenService;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

pub async fn setup_database() -> Arc<Database> {
    Arc::new(
        Database::connect("sqlite::memory:")
            .await
            .expect("in-memory database"),
    )
}

pub async fn setup_persistence() -> (Arc<Database>, Arc<Persistence>) {
    let db = setup_database().await;
    let uow = Arc::new(Persistence::new(db.get_connection()));
    (db, uow)
}

pub fn test_tokens() -> TokenService {
    TokenService::new(TEST_SECRET.as_bytes(), Duration::from_secs(3600))
}

/// Advice provider that answers with canned text and remembers prompts.
#[derive(Default)]
pub struct StubAdviceClient {
    pub answer: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubAdviceClient {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AdviceClient for StubAdviceClient {
    async fn generate(&self, prompt: String) -> AppResult<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt);
        }
        self.answer
            .clone()
            .ok_or_else(|| AppError::upstream("advice provider unavailable"))
    }
}
