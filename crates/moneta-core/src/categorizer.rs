//! Batch transaction categorization
//!
//! The categorizer wraps an optional AI backend and never fails: when no
//! backend is configured, the model is unreachable, the response cannot be
//! parsed, or any returned label falls outside the category set, the ENTIRE
//! batch falls back to `other`. Partial results are never mixed with
//! fallbacks, so a statement is either fully model-categorized or uniformly
//! uncategorized.

use tracing::{debug, warn};

use crate::ai::{AIBackend, AIClient, CategorizationItem};
use crate::models::{Category, CategorizedDraft, TransactionDraft};

pub struct TransactionCategorizer {
    ai: Option<AIClient>,
}

impl TransactionCategorizer {
    pub fn new(ai: Option<AIClient>) -> Self {
        Self { ai }
    }

    /// Categorize a batch of drafts in a single model call
    ///
    /// Infallible by contract; the output is always one `CategorizedDraft`
    /// per input draft, in input order.
    pub async fn categorize(&self, drafts: Vec<TransactionDraft>) -> Vec<CategorizedDraft> {
        if drafts.is_empty() {
            return Vec::new();
        }

        let categories = match self.ai {
            Some(ref client) => match self.request_categories(client, &drafts).await {
                Some(categories) => categories,
                None => vec![Category::Other; drafts.len()],
            },
            None => {
                warn!(
                    count = drafts.len(),
                    "No AI backend configured, categorizing as other"
                );
                vec![Category::Other; drafts.len()]
            }
        };

        drafts
            .into_iter()
            .zip(categories)
            .map(|(draft, category)| CategorizedDraft { draft, category })
            .collect()
    }

    /// One attempt against the backend; `None` means fall back
    async fn request_categories(
        &self,
        client: &AIClient,
        drafts: &[TransactionDraft],
    ) -> Option<Vec<Category>> {
        let items: Vec<CategorizationItem> = drafts
            .iter()
            .map(|d| CategorizationItem {
                description: d.description.clone(),
                amount: d.amount,
                currency: d.currency.clone(),
            })
            .collect();

        let labels = match client.categorize_transactions(&items).await {
            Ok(labels) => labels,
            Err(e) => {
                warn!(
                    model = client.model(),
                    error = %e,
                    "Categorization request failed, falling back to other"
                );
                return None;
            }
        };

        if labels.len() != drafts.len() {
            warn!(
                model = client.model(),
                expected = drafts.len(),
                got = labels.len(),
                "Model returned the wrong number of labels, falling back to other"
            );
            return None;
        }

        let mut categories = Vec::with_capacity(labels.len());
        for label in &labels {
            match Category::from_label(label) {
                Some(category) => categories.push(category),
                None => {
                    warn!(
                        model = client.model(),
                        label = %label,
                        "Model returned an unknown category, falling back to other"
                    );
                    return None;
                }
            }
        }

        debug!(count = categories.len(), model = client.model(), "Batch categorized");
        Some(categories)
    }
}
