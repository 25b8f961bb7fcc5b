// crates/config/src/validator.rs

use nameforge_core::{NameforgeError, NameforgeResult};
use tracing::warn;

use crate::NameforgeConfig;

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &NameforgeConfig) -> NameforgeResult<()> {
        // Validate LLM settings
        if !["groq", "openrouter"].contains(&config.llm.provider.as_str()) {
            return Err(NameforgeError::Config(format!(
                "Unknown LLM provider: {}",
                config.llm.provider
            )));
        }
        if config.llm.model.trim().is_empty() {
            return Err(NameforgeError::Config("Model name must not be empty".to_string()));
        }
        if config.llm.api_key_env.trim().is_empty() {
            return Err(NameforgeError::Config("API key env var must not be empty".to_string()));
        }
        if config.llm.max_tokens == 0 {
            return Err(NameforgeError::Config("max_tokens must be > 0".to_string()));
        }
        if !(0.0..=2.0).contains(&config.llm.temperature) {
            return Err(NameforgeError::Config("Temperature must be 0.0-2.0".to_string()));
        }
        if config.llm.timeout_s == 0 {
            return Err(NameforgeError::Config("Timeout must be > 0".to_string()));
        }

        // Validate API settings
        if config.api.enabled && config.api.port == 0 {
            return Err(NameforgeError::Config("Invalid API port".to_string()));
        }
        if config.llm.resolve_api_key().is_none() {
            warn!(
                "No API key found in {} or fallback; conversion requests will fail",
                config.llm.api_key_env
            );
        }

        Ok(())
    }
}
