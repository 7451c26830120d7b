pub mod bedrock;
pub mod ollama;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use sonara_core::ai::{AiError, CompletionClient};

/// Provider selection, typically deserialized from service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    Bedrock {
        /// Inference profile ID, e.g. `us.anthropic.claude-sonnet-4-20250514-v1:0`.
        model_id: String,
        region: String,
    },
    Ollama {
        base_url: String,
        model: String,
    },
}

/// Build a completion client from configuration.
pub async fn create_client(config: &ProviderConfig) -> Result<Arc<dyn CompletionClient>, AiError> {
    match config {
        ProviderConfig::Bedrock { model_id, region } => {
            let client = bedrock::BedrockClient::new(region, model_id).await;
            Ok(Arc::new(client))
        }
        ProviderConfig::Ollama { base_url, model } => {
            let client = ollama::OllamaClient::new(base_url, model)?;
            Ok(Arc::new(client))
        }
    }
}
