//! Bedrock Converse adapter.
//!
//! One completion call is one Converse invocation: the system prompt goes
//! in a `SystemContentBlock`, the user message in a single text message,
//! and the reply's text blocks are concatenated. Token usage from the
//! response is priced against the model's pricing table when known.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, Message, SystemContentBlock,
};
use tracing::info;

use sonara_core::ai::{AiError, Completion, CompletionClient};
use sonara_core::models::usage::TokenUsage;

use crate::tokens;

pub struct BedrockClient {
    client: aws_sdk_bedrockruntime::Client,
    model_id: String,
}

impl BedrockClient {
    /// Build a client for a region and model, loading AWS credentials from
    /// the default chain.
    pub async fn new(region: &str, model_id: &str) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()))
            .load()
            .await;
        Self::from_config(&config, model_id)
    }

    pub fn from_config(config: &aws_config::SdkConfig, model_id: &str) -> Self {
        Self {
            client: aws_sdk_bedrockruntime::Client::new(config),
            model_id: model_id.to_string(),
        }
    }
}

#[async_trait]
impl CompletionClient for BedrockClient {
    fn id(&self) -> &str {
        &self.model_id
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Completion, AiError> {
        let pricing = tokens::get_pricing(&self.model_id);

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(system_prompt.to_string()))
            .messages(
                Message::builder()
                    .role(ConversationRole::User)
                    .content(ContentBlock::Text(user_message.to_string()))
                    .build()
                    .map_err(|e| AiError::Invocation(e.to_string()))?,
            )
            .send()
            .await
            .map_err(|e| AiError::Invocation(e.into_service_error().to_string()))?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| AiError::ResponseParse("no message in response".to_string()))?;

        let text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        let usage = response.usage().map(|u| {
            let token_count = tokens::extract_token_usage(u);
            match &pricing {
                Some(p) => tokens::calculate_cost(token_count, p),
                None => TokenUsage {
                    tokens: token_count,
                    cost_usd: 0.0,
                },
            }
        });

        info!(
            model_id = %self.model_id,
            response_len = text.len(),
            "bedrock completion finished"
        );

        Ok(Completion { text, usage })
    }
}
