//! Material advice — an optional LLM call the customer can make while
//! picking a tile type.
//!
//! Providers implement `AdviceProvider` and may fail. The form only ever
//! talks to `MaterialConsultant`, which turns every failure into a fixed
//! apology so the flow never breaks on it.

pub mod consultant;
pub mod gemini;

pub use consultant::MaterialConsultant;
pub use gemini::GeminiAdvisor;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AdviceError;

/// Instruction sent with every advice query.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert flooring and tile consultant for a \
    high-end renovation company. Provide concise, professional advice on tile selection, \
    durability, and aesthetics. Keep answers under 150 words.";

/// Something that can answer a free-text question.
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    fn model_name(&self) -> &str;

    /// Answer `query`. An empty string means the model had nothing to say.
    async fn advise(&self, query: &str) -> Result<String, AdviceError>;
}

/// Configuration for creating an advice provider.
#[derive(Debug, Clone)]
pub struct AdviceConfig {
    pub api_key: secrecy::SecretString,
    pub model: String,
    pub timeout: Duration,
}

/// Create the advice provider from configuration.
pub fn create_provider(config: &AdviceConfig) -> Result<Arc<dyn AdviceProvider>, AdviceError> {
    let advisor = GeminiAdvisor::new(config)?;
    tracing::info!("Using Gemini for material advice (model: {})", config.model);
    Ok(Arc::new(advisor))
}
