// tests/convert_integration.rs

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use httpmock::prelude::*;
use nameforge_api::handlers::ApiHandlers;
use nameforge_api::{ApiConfig, ApiServer};
use nameforge_core::NameforgeError;
use nameforge_llm::{LlmConfig, NameConverter, ProviderKind};
use serde_json::json;
use tower::ServiceExt;

const MODEL_REPLY: &str = r#"```json
{
  "original_name": "Maria",
  "name_meaning": "of the sea, beloved",
  "cultural_translation": "海の愛",
  "final_name": {
    "native_script": "舞莉亜",
    "romanized": "Maria",
    "pronunciation": "mah-ree-ah",
    "meaning_in_english": "dancing jasmine of Asia"
  }
}
```"#;

fn llm_config(base_url: String) -> LlmConfig {
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

fn completion_envelope(content: &str) -> serde_json::Value {
    json!({
        "choices": [{"message": {"role": "assistant", "content": content}}],
        "usage": {"prompt_tokens": 180, "completion_tokens": 60, "total_tokens": 240}
    })
}

fn test_router(base_url: String) -> axum::Router {
    let converter = NameConverter::new(llm_config(base_url)).expect("converter should build");
    let handlers = Arc::new(ApiHandlers::new(Some(Arc::new(converter))));
    ApiServer::new(ApiConfig::default(), handlers).router()
}

fn post_convert(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/convert")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

#[tokio::test]
async fn converter_round_trip_with_mocked_upstream() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer test-key")
                .body_contains("Maria")
                .body_contains("japanese");
            then.status(200).json_body(completion_envelope(MODEL_REPLY));
        })
        .await;

    let converter = NameConverter::new(llm_config(server.base_url())).unwrap();
    let result = converter.convert("Maria", "japanese").await.unwrap();

    mock.assert_async().await;
    assert_eq!(result.original_name, "Maria");
    assert_eq!(result.final_name.native_script, "舞莉亜");
    assert_eq!(result.final_name.romanized, "Maria");
    assert_eq!(result.final_name.pronunciation, "mah-ree-ah");
}

#[tokio::test]
async fn converter_rejects_empty_name_before_any_upstream_call() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(completion_envelope(MODEL_REPLY));
        })
        .await;

    let converter = NameConverter::new(llm_config(server.base_url())).unwrap();
    let err = converter.convert("   ", "japanese").await.unwrap_err();

    assert!(matches!(err, NameforgeError::BadRequest(_)));
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn endpoint_returns_conversion_on_well_formed_reply() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(completion_envelope(MODEL_REPLY));
        })
        .await;

    let response = test_router(server.base_url())
        .oneshot(post_convert(r#"{"name":"Maria","culture":"japanese"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["original_name"], "Maria");
    assert!(!body["final_name"]["native_script"]
        .as_str()
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn endpoint_maps_prose_reply_to_internal_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .json_body(completion_envelope("Sorry, I can't help."));
        })
        .await;

    let response = test_router(server.base_url())
        .oneshot(post_convert(r#"{"name":"Maria","culture":"japanese"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body.get("error").is_some());
    assert_eq!(body["details"], "invalid_response");
}

#[tokio::test]
async fn endpoint_maps_upstream_failure_to_internal_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(500)
                .json_body(json!({"error": {"message": "backend unavailable"}}));
        })
        .await;

    let response = test_router(server.base_url())
        .oneshot(post_convert(r#"{"name":"Maria","culture":"japanese"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["details"], "upstream");
}

#[tokio::test]
async fn endpoint_forwards_unknown_culture_tags() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("valyrian");
            then.status(200).json_body(completion_envelope(
                r#"{"original_name":"Maria","final_name":{"native_script":"Maelirya"}}"#,
            ));
        })
        .await;

    let response = test_router(server.base_url())
        .oneshot(post_convert(r#"{"name":"Maria","culture":"valyrian"}"#))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    // Fields the model omitted are present with fallback defaults.
    assert_eq!(body["name_meaning"], "Unknown");
    assert_eq!(body["final_name"]["romanized"], "");
}
