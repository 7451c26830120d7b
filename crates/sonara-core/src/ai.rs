//! Provider-neutral completion seam.
//!
//! Every external model call in the pipeline goes through [`CompletionClient`]:
//! submit a system prompt and a user message, receive text. Engines hold an
//! `Arc<dyn CompletionClient>` injected at construction so tests can
//! substitute fakes and the platform can swap or combine providers
//! (single-service, hybrid, consultation) without touching engine contracts.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::usage::TokenUsage;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("response parsing failed: {0}")]
    ResponseParse(String),

    #[error("response did not conform to expected schema: {0}")]
    SchemaViolation(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("provider configuration error: {0}")]
    Config(String),
}

/// The result of one completion call.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    /// Token usage and cost, when the provider reports it.
    pub usage: Option<TokenUsage>,
}

/// Extract the outermost JSON object from a model response.
///
/// Prompts ask for bare JSON, but responses sometimes arrive wrapped in
/// prose or code fences; parsers call this before deserializing.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Extract the outermost JSON array from a model response.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// A text-completion provider: submit a prompt, receive text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Stable identifier recorded in transactions and logs for provenance.
    fn id(&self) -> &str;

    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Completion, AiError>;
}
