//! Ollama adapter for self-hosted deployments.
//!
//! Uses the `/api/generate` endpoint with streaming disabled. Ollama does
//! not report billable token usage, so completions carry none.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use sonara_core::ai::{AiError, Completion, CompletionClient};

pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    id: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AiError::Config(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            id: format!("ollama/{model}"),
        })
    }
}

#[async_trait]
impl CompletionClient for OllamaClient {
    fn id(&self) -> &str {
        &self.id
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<Completion, AiError> {
        let request = GenerateRequest {
            model: &self.model,
            system: system_prompt,
            prompt: user_message,
            stream: false,
        };

        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::Invocation(e.to_string()))?
            .error_for_status()
            .map_err(|e| AiError::Invocation(e.to_string()))?;

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AiError::ResponseParse(e.to_string()))?;

        info!(model = %self.model, response_len = body.response.len(), "ollama completion finished");

        Ok(Completion {
            text: body.response,
            usage: None,
        })
    }
}
