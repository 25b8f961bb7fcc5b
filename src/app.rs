// src/app.rs
use std::str::FromStr;
use std::sync::Arc;

use nameforge_api::handlers::ApiHandlers;
use nameforge_api::{ApiConfig, ApiServer};
use nameforge_config::NameforgeConfig;
use nameforge_core::{NameforgeError, NameforgeResult};
use nameforge_llm::{LlmConfig, NameConverter, ProviderKind};
use tokio::signal;
use tracing::{error, info, warn};

pub struct NameforgeApp {
    server: Option<ApiServer>,
}

impl NameforgeApp {
    pub fn new(config: NameforgeConfig) -> NameforgeResult<Self> {
        info!("Initializing Nameforge components...");

        let converter = match config.llm.resolve_api_key() {
            Some(api_key) => {
                let llm_config = LlmConfig {
                    provider: ProviderKind::from_str(&config.llm.provider)?,
                    model: config.llm.model.clone(),
                    api_key,
                    base_url: config.llm.base_url.clone(),
                    max_tokens: config.llm.max_tokens,
                    temperature: config.llm.temperature,
                    timeout_s: config.llm.timeout_s,
                };
                Some(Arc::new(NameConverter::new(llm_config)?))
            }
            None => {
                warn!(
                    "No API key in {} or its fallback; conversion requests will fail until one is set",
                    config.llm.api_key_env
                );
                None
            }
        };

        let handlers = Arc::new(ApiHandlers::new(converter));

        let server = config.api.enabled.then(|| {
            ApiServer::new(
                ApiConfig {
                    host: config.api.host.clone(),
                    port: config.api.port,
                    cors_enabled: config.api.cors_enabled,
                },
                handlers,
            )
        });

        Ok(Self { server })
    }

    pub async fn run(&mut self) -> NameforgeResult<()> {
        info!("Starting Nameforge service...");

        if let Some(server) = self.server.take() {
            tokio::spawn(async move {
                if let Err(e) = server.serve().await {
                    error!("API server error: {}", e);
                }
            });
        }

        self.wait_for_shutdown().await
    }

    async fn wait_for_shutdown(&self) -> NameforgeResult<()> {
        match signal::ctrl_c().await {
            Ok(()) => {
                info!("Received shutdown signal");
                Ok(())
            }
            Err(e) => {
                error!("Failed to listen for shutdown signal: {}", e);
                Err(NameforgeError::Io(e))
            }
        }
    }
}
