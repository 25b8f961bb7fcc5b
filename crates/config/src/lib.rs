// crates/config/src/lib.rs

use serde::{Deserialize, Serialize};

pub mod loader;
pub mod validator;

pub use loader::ConfigLoader;
pub use validator::ConfigValidator;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameforgeConfig {
    pub app: AppSettings,
    pub llm: LlmSettings,
    pub api: ApiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    pub provider: String,
    pub model: String,
    pub api_key_env: String,
    #[serde(default = "default_fallback_api_key_env")]
    pub fallback_api_key_env: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_llm_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "default_llm_temperature")]
    pub temperature: f32,
    #[serde(default = "default_llm_timeout_s")]
    pub timeout_s: u64,
}

fn default_fallback_api_key_env() -> Option<String> {
    Some("NAMEFORGE_DEV_API_KEY".to_string())
}

const fn default_llm_max_tokens() -> usize {
    1024
}

const fn default_llm_temperature() -> f32 {
    0.5
}

const fn default_llm_timeout_s() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,
}

impl Default for NameforgeConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                log_level: "info".to_string(),
            },
            llm: LlmSettings {
                provider: "groq".to_string(),
                model: "mixtral-8x7b-32768".to_string(),
                api_key_env: "GROQ_API_KEY".to_string(),
                fallback_api_key_env: default_fallback_api_key_env(),
                base_url: None,
                max_tokens: default_llm_max_tokens(),
                temperature: default_llm_temperature(),
                timeout_s: default_llm_timeout_s(),
            },
            api: ApiSettings {
                enabled: true,
                host: "0.0.0.0".to_string(),
                port: 3000,
                cors_enabled: true,
            },
        }
    }
}

impl LlmSettings {
    /// Resolve the upstream API key once at startup. The primary env var wins;
    /// the local-development fallback var is consulted only when the primary
    /// is unset or empty.
    pub fn resolve_api_key(&self) -> Option<String> {
        read_env_key(&self.api_key_env).or_else(|| {
            self.fallback_api_key_env
                .as_deref()
                .and_then(read_env_key)
        })
    }
}

fn read_env_key(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.trim().is_empty())
}
