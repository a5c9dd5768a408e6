//! Client for the generative-language advice provider.
//!
//! One non-streaming `generateContent` call per request. The reply's text
//! parts are concatenated across all candidates.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{Config, ADVICE_REQUEST_TIMEOUT_SECS, GEMINI_API_BASE_URL};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Text generation backend used by the advice service.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AdviceClient: Send + Sync {
    /// Send `prompt` and return the generated text.
    async fn generate(&self, prompt: String) -> AppResult<String>;
}

/// Gemini REST client.
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(ADVICE_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("http client: {}", e)))?;

        Ok(Self {
            http,
            base_url: GEMINI_API_BASE_URL.to_string(),
            model: model.into(),
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.gemini_api_key().map(String::from),
            config.gemini_model.clone(),
        )
    }

    /// Point the client at another endpoint root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl AdviceClient for GeminiClient {
    async fn generate(&self, prompt: String) -> AppResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::upstream("GEMINI_API_KEY is not configured"))?;

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&GenerateRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(format!(
                "provider returned {}: {}",
                status,
                truncate(&body, 512)
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("invalid response body: {}", e)))?;

        let text = body.text();
        if text.trim().is_empty() {
            return Err(AppError::upstream("provider returned no text"));
        }
        Ok(text)
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

impl GenerateRequest {
    fn from_prompt(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt) }],
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateResponse {
    fn text(&self) -> String {
        self.candidates
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.text.as_deref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GenerateRequest::from_prompt("hello".into())).unwrap();
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn test_response_text_concatenates_candidates() {
        let json = serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": "Cut "}, {"text": "food. "}]}},
                {"content": {"parts": [{"text": "Cook at home."}]}},
                {"finishReason": "SAFETY"}
            ]
        });
        let response: GenerateResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.text(), "Cut food. Cook at home.");
    }

    #[test]
    fn test_endpoint_uses_model() {
        let client = GeminiClient::new(None, "gemini-1.5-flash")
            .unwrap()
            .with_base_url("http://localhost:9/v1beta/");
        assert_eq!(
            client.endpoint(),
            "http://localhost:9/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_is_upstream_failure() {
        let client = GeminiClient::new(None, "gemini-1.5-flash").unwrap();
        let result = client.generate("prompt".into()).await;
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = GeminiClient::new(Some("k-123".into()), "m").unwrap();
        assert!(!format!("{:?}", client).contains("k-123"));
    }
}
