// src/main.rs

use std::path::Path;

use anyhow::Result;
use nameforge::NameforgeApp;
use nameforge_config::{ConfigLoader, ConfigValidator, NameforgeConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;
    init_logging(&config.app.log_level);

    info!("Starting Nameforge v{}", env!("CARGO_PKG_VERSION"));

    let mut app = NameforgeApp::new(config)?;
    app.run().await?;

    info!("Nameforge shut down successfully");
    Ok(())
}

// RUST_LOG wins over the configured level when both are set.
fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_config() -> Result<NameforgeConfig> {
    let path =
        std::env::var("NAMEFORGE_CONFIG").unwrap_or_else(|_| "config/nameforge.toml".to_string());
    let config = ConfigLoader::load_or_default(Path::new(&path))?;
    ConfigValidator::validate(&config)?;
    Ok(config)
}
