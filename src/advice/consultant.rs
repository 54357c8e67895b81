//! The boundary between the form and the advice provider.

use std::sync::Arc;

use super::AdviceProvider;

/// Shown when the provider fails or is not configured.
pub const UNAVAILABLE: &str = "Sorry, our design assistant is currently unavailable.";
/// Shown when the provider answers with nothing.
pub const NO_ADVICE: &str = "I apologize, I couldn't generate advice at this moment.";

/// Answers material questions and never fails.
#[derive(Clone, Default)]
pub struct MaterialConsultant {
    provider: Option<Arc<dyn AdviceProvider>>,
}

impl MaterialConsultant {
    pub fn new(provider: Arc<dyn AdviceProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// A consultant with no provider; every question gets `UNAVAILABLE`.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn is_online(&self) -> bool {
        self.provider.is_some()
    }

    /// Ask a question. Blank questions are not sent and return `None`.
    pub async fn ask(&self, query: &str) -> Option<String> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let Some(provider) = &self.provider else {
            tracing::debug!("Advice requested but no provider is configured");
            return Some(UNAVAILABLE.to_string());
        };

        let answer = match provider.advise(query).await {
            Ok(text) if text.trim().is_empty() => NO_ADVICE.to_string(),
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(model = provider.model_name(), error = %e, "Advice request failed");
                UNAVAILABLE.to_string()
            }
        };
        Some(answer)
    }
}
