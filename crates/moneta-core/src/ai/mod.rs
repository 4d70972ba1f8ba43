//! Pluggable local AI backend abstraction
//!
//! This module provides a backend-agnostic interface for transaction
//! categorization. All backends run locally (no cloud APIs).
//!
//! # Architecture
//!
//! - `AIBackend` trait: defines the interface for categorization
//! - `AIClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OllamaBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: Backend to use (ollama, mock). Default: ollama
//! - `OLLAMA_HOST`: Ollama server URL (required for ollama backend)
//! - `OLLAMA_MODEL`: Model name (default: llama3.2)

mod mock;
mod ollama;
pub mod parsing;

pub use mock::MockBackend;
pub use ollama::OllamaBackend;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::models::Category;

/// The slice of a transaction the model needs to pick a category
#[derive(Debug, Clone, Serialize)]
pub struct CategorizationItem {
    pub description: String,
    pub amount: f64,
    pub currency: String,
}

/// Build the batch categorization prompt
///
/// The label list is generated from [`Category::ALL`], so the set the model
/// is offered and the set the categorizer accepts cannot drift apart.
pub fn build_categorization_prompt(items: &[CategorizationItem]) -> Result<String> {
    let labels = Category::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let transactions = serde_json::to_string_pretty(items)?;
    Ok(format!(
        "You are a personal finance assistant. Assign each bank transaction below \
         exactly one category from this list: {labels}.\n\n\
         Transactions:\n{transactions}\n\n\
         Respond with only a JSON array of category labels, one per transaction, \
         in the same order. No explanations."
    ))
}

/// Trait defining the interface for all AI backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait AIBackend: Send + Sync {
    /// Categorize a batch of transactions in a single model call
    ///
    /// Returns one raw label per item, in item order. Labels are returned
    /// verbatim; validating them against the category set is the caller's
    /// responsibility.
    async fn categorize_transactions(&self, items: &[CategorizationItem]) -> Result<Vec<String>>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AIClient {
    /// Ollama backend (HTTP API)
    Ollama(OllamaBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Create an AI client from environment variables
    ///
    /// Checks `AI_BACKEND` to determine which backend to use:
    /// - `ollama` (default): Uses OLLAMA_HOST and OLLAMA_MODEL
    /// - `mock`: Creates a mock backend for testing
    ///
    /// Returns None if the required environment variables are not set.
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var("AI_BACKEND").unwrap_or_else(|_| "ollama".to_string());

        match backend.to_lowercase().as_str() {
            "ollama" => OllamaBackend::from_env().map(AIClient::Ollama),
            "mock" => Some(AIClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown AI_BACKEND, falling back to ollama");
                OllamaBackend::from_env().map(AIClient::Ollama)
            }
        }
    }

    /// Create an Ollama backend directly
    pub fn ollama(host: &str, model: &str) -> Self {
        AIClient::Ollama(OllamaBackend::new(host, model))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }

    /// Create a new instance with a different model
    pub fn with_model(&self, model: &str) -> Self {
        match self {
            AIClient::Ollama(b) => AIClient::Ollama(b.with_model(model)),
            AIClient::Mock(b) => AIClient::Mock(b.clone()),
        }
    }
}

#[async_trait]
impl AIBackend for AIClient {
    async fn categorize_transactions(&self, items: &[CategorizationItem]) -> Result<Vec<String>> {
        match self {
            AIClient::Ollama(b) => b.categorize_transactions(items).await,
            AIClient::Mock(b) => b.categorize_transactions(items).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::Ollama(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::Ollama(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::Ollama(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(description: &str) -> CategorizationItem {
        CategorizationItem {
            description: description.to_string(),
            amount: -10.0,
            currency: "EUR".to_string(),
        }
    }

    #[test]
    fn test_ai_client_mock() {
        let client = AIClient::mock();
        assert_eq!(client.model(), "mock");
        assert_eq!(client.host(), "mock://localhost");
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        let client = AIClient::mock();
        assert!(client.health_check().await);
    }

    #[test]
    fn test_prompt_contains_every_label() {
        let prompt = build_categorization_prompt(&[item("Coffee Shop")]).unwrap();
        for category in Category::ALL {
            assert!(prompt.contains(category.as_str()), "missing {}", category);
        }
        assert!(prompt.contains("Coffee Shop"));
    }
}
