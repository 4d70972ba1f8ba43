//! Mock AI backend for testing
//!
//! Keyword heuristics stand in for a real model so tests and offline
//! development never need an Ollama server.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::Category;

use super::{AIBackend, CategorizationItem};

#[derive(Clone, Default)]
pub struct MockBackend {
    /// Canned response overriding the heuristics, for exercising the
    /// categorizer's validation paths
    canned_labels: Option<Vec<String>>,
    failing: bool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always return these labels regardless of input
    pub fn with_labels(labels: Vec<String>) -> Self {
        Self {
            canned_labels: Some(labels),
            failing: false,
        }
    }

    /// Always fail, simulating an unreachable model
    pub fn failing() -> Self {
        Self {
            canned_labels: None,
            failing: true,
        }
    }

    fn categorize_one(item: &CategorizationItem) -> Category {
        let description = item.description.to_lowercase();
        if description.contains("coffee")
            || description.contains("restaurant")
            || description.contains("cafe")
        {
            Category::Restaurants
        } else if description.contains("market")
            || description.contains("grocer")
            || description.contains("supermarket")
        {
            Category::Groceries
        } else if description.contains("uber")
            || description.contains("taxi")
            || description.contains("metro")
        {
            Category::Transport
        } else if description.contains("salary") || description.contains("payroll") {
            Category::Income
        } else if item.amount > 0.0 && description.contains("transfer") {
            Category::Transfers
        } else {
            Category::Other
        }
    }
}

#[async_trait]
impl AIBackend for MockBackend {
    async fn categorize_transactions(&self, items: &[CategorizationItem]) -> Result<Vec<String>> {
        if self.failing {
            return Err(Error::InvalidData("mock backend set to fail".to_string()));
        }
        if let Some(ref labels) = self.canned_labels {
            return Ok(labels.clone());
        }
        Ok(items
            .iter()
            .map(|item| Self::categorize_one(item).as_str().to_string())
            .collect())
    }

    async fn health_check(&self) -> bool {
        !self.failing
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(description: &str, amount: f64) -> CategorizationItem {
        CategorizationItem {
            description: description.to_string(),
            amount,
            currency: "EUR".to_string(),
        }
    }

    #[tokio::test]
    async fn test_heuristics() {
        let backend = MockBackend::new();
        let labels = backend
            .categorize_transactions(&[
                item("Coffee Shop", -3.50),
                item("Central Market", -42.10),
                item("Uber Trip", -12.00),
                item("ACME Payroll Salary", 2500.00),
                item("Something Unrecognizable", -1.00),
            ])
            .await
            .unwrap();
        assert_eq!(labels, vec!["restaurants", "groceries", "transport", "income", "other"]);
    }

    #[tokio::test]
    async fn test_canned_labels() {
        let backend = MockBackend::with_labels(vec!["GROCERIES".to_string()]);
        let labels = backend
            .categorize_transactions(&[item("whatever", -1.0)])
            .await
            .unwrap();
        assert_eq!(labels, vec!["GROCERIES"]);
    }

    #[tokio::test]
    async fn test_failing() {
        let backend = MockBackend::failing();
        assert!(!backend.health_check().await);
        assert!(backend
            .categorize_transactions(&[item("x", -1.0)])
            .await
            .is_err());
    }
}
