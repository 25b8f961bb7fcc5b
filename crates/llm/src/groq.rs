// crates/llm/src/groq.rs

use std::time::Duration;

use async_trait::async_trait;
use nameforge_core::{NameforgeError, NameforgeResult};
use reqwest::Client;
use serde_json::{json, Value};

use crate::{parse_usage, CompletionProvider, CompletionRequest, CompletionResponse, LlmConfig};

pub struct GroqProvider {
    config: LlmConfig,
    client: Client,
}

impl GroqProvider {
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
            .unwrap_or_else(|| "https://api.groq.com/openai/v1/chat/completions".to_string())
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    async fn complete(&self, request: CompletionRequest) -> NameforgeResult<CompletionResponse> {
        let payload = json!({
            "model": self.config.model,
            "messages": request.messages,
            "max_tokens": request.max_tokens.unwrap_or(self.config.max_tokens),
            "temperature": request.temperature.unwrap_or(self.config.temperature),
        });

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| NameforgeError::Upstream(format!("LLM request failed: {err}")))?;

        let status = response.status();
        let json: Value = response
            .json()
            .await
            .map_err(|err| NameforgeError::Upstream(format!("Failed to parse LLM response: {err}")))?;

        if !status.is_success() {
            let message = json["error"]
                .get("message")
                .and_then(Value::as_str)
                .map(|s| s.to_string());
            return Err(NameforgeError::Upstream(format!(
                "Groq returned {status}: {}",
                message.unwrap_or_else(|| json.to_string())
            )));
        }

        let content = json
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                NameforgeError::Upstream("Missing message content in Groq response".to_string())
            })?
            .to_string();

        Ok(CompletionResponse {
            content,
            usage: parse_usage(&json),
        })
    }

    fn name(&self) -> &str {
        "groq"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Message, ProviderKind, Role};
    use httpmock::prelude::*;

    fn test_config(base_url: String) -> LlmConfig {
        LlmConfig {
            provider: ProviderKind::Groq,
            model: "mixtral-8x7b-32768".to_string(),
            api_key: "test-key".to_string(),
            base_url: Some(base_url),
            max_tokens: 1024,
            temperature: 0.5,
            timeout_s: 5,
        }
    }

    fn test_request() -> CompletionRequest {
        CompletionRequest {
            messages: vec![Message {
                role: Role::User,
                content: "hello".to_string(),
            }],
            max_tokens: None,
            temperature: None,
        }
    }

    #[tokio::test]
    async fn extracts_content_and_usage() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .header("authorization", "Bearer test-key");
                then.status(200).json_body(serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": "{\"original_name\":\"Maria\"}"}}],
                    "usage": {"prompt_tokens": 42, "completion_tokens": 10, "total_tokens": 52}
                }));
            })
            .await;

        let provider = GroqProvider::new(&test_config(server.base_url())).unwrap();
        let response = provider.complete(test_request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.content, "{\"original_name\":\"Maria\"}");
        assert_eq!(response.usage.total_tokens, 52);
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_error_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(429).json_body(serde_json::json!({
                    "error": {"message": "rate limit exceeded"}
                }));
            })
            .await;

        let provider = GroqProvider::new(&test_config(server.base_url())).unwrap();
        let err = provider.complete(test_request()).await.unwrap_err();

        assert!(matches!(err, NameforgeError::Upstream(_)));
        assert!(err.to_string().contains("rate limit exceeded"));
    }

    #[tokio::test]
    async fn missing_content_is_an_upstream_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(serde_json::json!({"choices": []}));
            })
            .await;

        let provider = GroqProvider::new(&test_config(server.base_url())).unwrap();
        let err = provider.complete(test_request()).await.unwrap_err();

        assert!(matches!(err, NameforgeError::Upstream(_)));
    }
}
