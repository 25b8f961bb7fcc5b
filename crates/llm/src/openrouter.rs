// crates/llm/src/openrouter.rs

use std::time::Duration;

use async_trait::async_trait;
use nameforge_core::{NameforgeError, NameforgeResult};
use reqwest::Client;
use serde_json::{json, Value};

use crate::{parse_usage, CompletionProvider, CompletionRequest, CompletionResponse, LlmConfig};

pub struct OpenRouterProvider {
    config: LlmConfig,
    client: Client,
}

impl OpenRouterProvider {
    pub fn new(config: &LlmConfig) -> NameforgeResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_s))
            .build()
            .map_err(|err| NameforgeError::Upstream(format!("failed to build client: {err}")))?;

        Ok(Self {
            config: config.clone(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        self.config
            .base_url
            .as_ref()
            .map(|base| format!("{}/chat/completions", base.trim_end_matches('/')))
            .unwrap_or_else(|| "https://openrouter.ai/api/v1/chat/completions".to_string())
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    async fn complete(&self, request: CompletionRequest) -> NameforgeResult<CompletionResponse> {
        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&json!({
                "model": self.config.model,
                "messages": request.messages,
                "max_tokens": request.max_tokens.unwrap_or(self.config.max_tokens),
                "temperature": request.temperature.unwrap_or(self.config.temperature),
            }))
            .send()
            .await
            .map_err(|err| NameforgeError::Upstream(format!("LLM request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(NameforgeError::Upstream(format!(
                "OpenRouter returned {status}: {text}"
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|err| NameforgeError::Upstream(format!("Failed to parse LLM response: {err}")))?;

        let content = json
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                NameforgeError::Upstream("Missing message content in OpenRouter response".to_string())
            })?
            .to_string();

        Ok(CompletionResponse {
            content,
            usage: parse_usage(&json),
        })
    }

    fn name(&self) -> &str {
        "openrouter"
    }
}
