//! Test utilities for moneta-core
//!
//! This module provides testing infrastructure including a mock Ollama server
//! that can be used for development and integration tests.

use axum::{
    extract::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::sync::oneshot;

/// Mock Ollama server for testing and development
pub struct MockOllamaServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockOllamaServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/api/tags", get(handle_tags))
            .route("/api/generate", post(handle_generate));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockOllamaServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Ollama tags endpoint response (health check)
async fn handle_tags() -> Json<TagsResponse> {
    Json(TagsResponse {
        models: vec![ModelInfo {
            name: "llama3.2:latest".to_string(),
            modified_at: "2024-01-01T00:00:00Z".to_string(),
            size: 4_000_000_000,
        }],
    })
}

/// Ollama generate endpoint
///
/// Pulls the transaction array out of the categorization prompt, labels each
/// item with keyword heuristics, and wraps the answer in chatty prose so the
/// client's JSON extraction path gets exercised.
async fn handle_generate(Json(request): Json<GenerateRequest>) -> Json<GenerateResponse> {
    let labels = extract_items(&request.prompt)
        .into_iter()
        .map(|item| label_for(&item))
        .collect::<Vec<_>>();
    let labels_json = serde_json::to_string(&labels).unwrap();

    Json(GenerateResponse {
        model: request.model,
        response: format!("Here are the categories:\n```json\n{}\n```", labels_json),
        done: true,
    })
}

/// Extract the transaction items embedded in the prompt
fn extract_items(prompt: &str) -> Vec<PromptItem> {
    let Some(start) = prompt.find('[') else {
        return Vec::new();
    };
    let Some(end) = prompt.rfind(']') else {
        return Vec::new();
    };
    serde_json::from_str(&prompt[start..=end]).unwrap_or_default()
}

fn label_for(item: &PromptItem) -> String {
    let description = item.description.to_lowercase();
    let label = if description.contains("coffee") || description.contains("restaurant") {
        "restaurants"
    } else if description.contains("market") || description.contains("grocer") {
        "groceries"
    } else if description.contains("uber") || description.contains("taxi") {
        "transport"
    } else if description.contains("salary") || description.contains("payroll") {
        "income"
    } else if item.amount > 0.0 {
        "transfers"
    } else {
        "other"
    };
    label.to_string()
}

// Request/Response types for the mock server

#[derive(Debug, Serialize)]
struct TagsResponse {
    models: Vec<ModelInfo>,
}

#[derive(Debug, Serialize)]
struct ModelInfo {
    name: String,
    modified_at: String,
    size: u64,
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    #[allow(dead_code)]
    stream: bool,
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    model: String,
    response: String,
    done: bool,
}

#[derive(Debug, Default, Deserialize)]
struct PromptItem {
    #[serde(default)]
    description: String,
    #[serde(default)]
    amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AIBackend, CategorizationItem, OllamaBackend};

    fn item(description: &str, amount: f64) -> CategorizationItem {
        CategorizationItem {
            description: description.to_string(),
            amount,
            currency: "EUR".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_server_health_check() {
        let server = MockOllamaServer::start().await;
        let client = OllamaBackend::new(&server.url(), "test-model");

        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_mock_server_categorizes_batch() {
        let server = MockOllamaServer::start().await;
        let client = OllamaBackend::new(&server.url(), "test-model");

        let labels = client
            .categorize_transactions(&[
                item("Coffee Shop", -3.50),
                item("Central Market", -42.10),
                item("ACME Payroll Salary", 2500.00),
            ])
            .await
            .unwrap();
        assert_eq!(labels, vec!["restaurants", "groceries", "income"]);
    }

    #[tokio::test]
    async fn test_ollama_client_from_env_not_set() {
        // When OLLAMA_HOST is not set, from_env returns None
        std::env::remove_var("OLLAMA_HOST");
        let client = OllamaBackend::from_env();
        assert!(client.is_none());
    }
}
