//! Address autocompletion against a generative-text backend.
//!
//! The backend returns a short ordered list of plausible complete addresses
//! for a partial input. Lookups are stateless and best-effort: any failure
//! degrades to an empty list so a user can always fall back to typing the
//! address by hand.

pub mod autocomplete;
pub mod gemini;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

pub use autocomplete::AutocompleteField;
pub use gemini::GeminiBackend;

#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("suggestion backend unreachable: {0}")]
    Unreachable(String),

    #[error("suggestion backend returned malformed output: {0}")]
    Malformed(String),
}

/// Any generative backend that completes a partial address into a ranked
/// list of full addresses. Order is relevance as returned; no re-ranking.
#[async_trait]
pub trait SuggestionBackend: Send + Sync {
    async fn complete(&self, partial_address: &str) -> Result<Vec<String>, SuggestError>;
}

/// Degrade-to-empty wrapper around a backend: suggestion failure must never
/// block manual address entry, so it is logged and swallowed here.
#[derive(Clone)]
pub struct AddressSuggester {
    backend: Arc<dyn SuggestionBackend>,
}

impl AddressSuggester {
    pub fn new(backend: Arc<dyn SuggestionBackend>) -> Self {
        Self { backend }
    }

    pub async fn suggest(&self, partial_address: &str) -> Vec<String> {
        match self.backend.complete(partial_address).await {
            Ok(suggestions) => suggestions,
            Err(err) => {
                warn!(error = %err, "address suggestion degraded to empty");
                Vec::new()
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::testing::FakeBackend;
    use super::*;

    #[tokio::test]
    async fn suggester_passes_through_backend_order() {
        let suggester = AddressSuggester::new(Arc::new(FakeBackend::new()));
        let suggestions = suggester.suggest("Av. Italia").await;
        assert_eq!(
            suggestions,
            vec![
                "Av. Italia 1234, Montevideo".to_string(),
                "Av. Italia 5678, Montevideo".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn backend_failure_degrades_to_empty() {
        let suggester = AddressSuggester::new(Arc::new(FakeBackend::failing()));
        assert!(suggester.suggest("Av. Italia").await.is_empty());
    }
}
