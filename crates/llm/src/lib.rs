// crates/llm/src/lib.rs

use async_trait::async_trait;
use nameforge_core::{NameConversion, NameforgeError, NameforgeResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub mod groq;
pub mod normalize;
pub mod openrouter;
pub mod prompt;

use prompt::PromptBuilder;

/// LLM configuration, resolved once at startup from file/env settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: ProviderKind,
    pub model: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub max_tokens: usize,
    pub temperature: f32,
    pub timeout_s: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Groq,
    OpenRouter,
}

impl std::str::FromStr for ProviderKind {
    type Err = NameforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "groq" => Ok(Self::Groq),
            "openrouter" => Ok(Self::OpenRouter),
            other => Err(NameforgeError::Config(format!(
                "Unknown LLM provider: {other}"
            ))),
        }
    }
}

/// Chat-completion provider trait
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> NameforgeResult<CompletionResponse>;
    fn name(&self) -> &str;
}

/// Completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub max_tokens: Option<usize>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    pub usage: Usage,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

pub(crate) fn parse_usage(json: &Value) -> Usage {
    Usage {
        prompt_tokens: json
            .pointer("/usage/prompt_tokens")
            .and_then(Value::as_u64)
            .unwrap_or(0) as usize,
        completion_tokens: json
            .pointer("/usage/completion_tokens")
            .and_then(Value::as_u64)
            .unwrap_or(0) as usize,
        total_tokens: json
            .pointer("/usage/total_tokens")
            .and_then(Value::as_u64)
            .unwrap_or(0) as usize,
    }
}

/// Name conversion facade: builds the prompt, issues exactly one completion
/// call, and normalizes the model's reply. Holds no mutable state, so one
/// instance serves concurrent requests.
pub struct NameConverter {
    config: LlmConfig,
    provider: Box<dyn CompletionProvider>,
    prompt_builder: PromptBuilder,
}

impl NameConverter {
    pub fn new(config: LlmConfig) -> NameforgeResult<Self> {
        let provider: Box<dyn CompletionProvider> = match config.provider {
            ProviderKind::Groq => Box::new(groq::GroqProvider::new(&config)?),
            ProviderKind::OpenRouter => Box::new(openrouter::OpenRouterProvider::new(&config)?),
        };

        Ok(Self {
            config,
            provider,
            prompt_builder: PromptBuilder::new(),
        })
    }

    pub async fn convert(&self, name: &str, culture: &str) -> NameforgeResult<NameConversion> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NameforgeError::BadRequest("Name is required".to_string()));
        }
        let culture = culture.trim();
        if culture.is_empty() {
            return Err(NameforgeError::BadRequest("Culture is required".to_string()));
        }

        let prompt = self.prompt_builder.build(name, culture);

        let request = CompletionRequest {
            messages: vec![Message {
                role: Role::User,
                content: prompt,
            }],
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(self.config.temperature),
        };

        debug!(
            provider = self.provider.name(),
            culture, "requesting name conversion"
        );
        let response = self.provider.complete(request).await?;
        debug!(tokens = response.usage.total_tokens, "completion received");

        normalize::normalize(&response.content, name)
    }
}
