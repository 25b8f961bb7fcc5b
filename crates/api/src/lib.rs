// crates/api/src/lib.rs

use std::sync::Arc;

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use nameforge_core::{ConvertRequest, NameConversion, NameforgeResult};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod error;
pub mod handlers;

use error::ApiError;
use handlers::ApiHandlers;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_enabled: true,
        }
    }
}

/// API server
pub struct ApiServer {
    config: ApiConfig,
    handlers: Arc<ApiHandlers>,
}

impl ApiServer {
    pub fn new(config: ApiConfig, handlers: Arc<ApiHandlers>) -> Self {
        Self { config, handlers }
    }

    pub async fn serve(self) -> NameforgeResult<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("API server listening on {}", addr);

        axum::serve(listener, app).await?;

        Ok(())
    }

    pub fn router(&self) -> Router {
        let mut app = Router::new()
            .route("/health", get(health_check))
            .route("/ready", get(readiness_check))
            .route("/api/convert", post(convert_handler))
            .with_state(self.handlers.clone())
            .layer(TraceLayer::new_for_http());

        if self.config.cors_enabled {
            app = app.layer(CorsLayer::permissive());
        }

        app
    }
}

// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

// Readiness: alive but degraded when no API credential was resolved
async fn readiness_check(State(handlers): State<Arc<ApiHandlers>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "ready": handlers.converter_available(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

// Name conversion endpoint; non-POST methods get a 405 from axum routing
async fn convert_handler(
    State(handlers): State<Arc<ApiHandlers>>,
    Json(request): Json<ConvertRequest>,
) -> Result<Json<NameConversion>, ApiError> {
    let conversion = handlers.convert(request).await?;
    Ok(Json(conversion))
}
