// crates/config/src/loader.rs

use std::path::Path;

use nameforge_core::{NameforgeError, NameforgeResult};
use tracing::info;

use crate::NameforgeConfig;

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load_from_file(path: &Path) -> NameforgeResult<NameforgeConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NameforgeError::Config(format!("Failed to read config: {}", e)))?;

        let mut config: NameforgeConfig = toml::from_str(&content)
            .map_err(|e| NameforgeError::Config(format!("Failed to parse config: {}", e)))?;

        Self::apply_env_overrides(&mut config)?;

        Ok(config)
    }

    /// Load the config file when it exists, otherwise fall back to defaults.
    /// Environment overrides apply in both cases.
    pub fn load_or_default(path: &Path) -> NameforgeResult<NameforgeConfig> {
        if path.exists() {
            info!("Loading configuration from {:?}", path);
            Self::load_from_file(path)
        } else {
            info!("No config file at {:?}, using defaults", path);
            let mut config = NameforgeConfig::default();
            Self::apply_env_overrides(&mut config)?;
            Ok(config)
        }
    }

    pub fn apply_env_overrides(config: &mut NameforgeConfig) -> NameforgeResult<()> {
        if let Ok(level) = std::env::var("NAMEFORGE_LOG_LEVEL") {
            config.app.log_level = level;
        }
        if let Ok(provider) = std::env::var("NAMEFORGE_LLM_PROVIDER") {
            config.llm.provider = provider;
        }
        if let Ok(model) = std::env::var("NAMEFORGE_LLM_MODEL") {
            config.llm.model = model;
        }
        if let Ok(port) = std::env::var("NAMEFORGE_API_PORT") {
            config.api.port = port
                .parse()
                .map_err(|_| NameforgeError::Config("Invalid API port".to_string()))?;
        }

        Ok(())
    }
}
