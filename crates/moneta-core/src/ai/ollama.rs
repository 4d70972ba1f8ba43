//! Ollama backend implementation
//!
//! HTTP client for the Ollama `/api/generate` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

use super::parsing::parse_category_labels;
use super::{build_categorization_prompt, AIBackend, CategorizationItem};

/// Bounded per-request timeout; expiry surfaces as a categorization failure
/// and the batch falls back, it never stalls an ingestion
const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Clone)]
pub struct OllamaBackend {
    http_client: Client,
    base_url: String,
    model: String,
}

impl OllamaBackend {
    /// Create a new Ollama backend
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Create a new instance with a different model
    pub fn with_model(&self, model: &str) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            model: model.to_string(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("OLLAMA_HOST").ok()?;
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".to_string());
        Some(Self::new(&host, &model))
    }
}

/// Request to Ollama API
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Response from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

#[async_trait]
impl AIBackend for OllamaBackend {
    async fn categorize_transactions(&self, items: &[CategorizationItem]) -> Result<Vec<String>> {
        let request = OllamaRequest {
            model: self.model.clone(),
            prompt: build_categorization_prompt(items)?,
            stream: false,
        };

        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Http(response.error_for_status().unwrap_err()));
        }

        let ollama_response: OllamaResponse = response.json().await?;
        debug!("Ollama categorization response: {}", ollama_response.response);

        parse_category_labels(&ollama_response.response, items.len())
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_trailing_slash() {
        let backend = OllamaBackend::new("http://localhost:11434/", "llama3.2");
        assert_eq!(backend.host(), "http://localhost:11434");
        assert_eq!(backend.model(), "llama3.2");
    }

    #[test]
    fn test_with_model() {
        let backend = OllamaBackend::new("http://localhost:11434", "llama3.2");
        assert_eq!(backend.with_model("mistral").model(), "mistral");
    }

    #[test]
    fn test_request_timeout_is_single_digit_seconds() {
        assert!(REQUEST_TIMEOUT <= Duration::from_secs(9));
    }
}
