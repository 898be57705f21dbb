//! End-to-end tests for HttpExecutor against an in-process server

use super::*;
use llm_bench_core::{round_rate, round_seconds, ApiFormat, ModelSpec, ProviderSpec};

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;

// ============================================================================
// Test Server
// ============================================================================

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn header(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Echoes what the executor sent back in the completion text
async fn openai_echo(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "id": "chatcmpl-1",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": format!(
                    "{}|{}|{}|{}",
                    header(&headers, "authorization"),
                    body["model"].as_str().unwrap_or_default(),
                    body["temperature"],
                    body["max_tokens"],
                ),
            },
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 30, "total_tokens": 42},
    }))
}

async fn anthropic_echo(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "id": "msg_1",
        "type": "message",
        "content": [{
            "type": "text",
            "text": format!(
                "{}|{}|{}",
                header(&headers, "x-api-key"),
                header(&headers, "anthropic-version"),
                body.get("temperature").is_some(),
            ),
        }],
        "usage": {"input_tokens": 8, "output_tokens": 16},
    }))
}

fn job(base_url: &str, api_format: ApiFormat) -> BenchmarkJob {
    BenchmarkJob::new(
        Arc::new(ProviderSpec::new("local", base_url, "sk-test")),
        Arc::new(ModelSpec::new("m1", "model-one", api_format)),
    )
}

fn executor() -> HttpExecutor {
    HttpExecutor::new(None).unwrap()
}

// ============================================================================
// Success Path
// ============================================================================

#[tokio::test]
async fn test_openai_success() {
    let base = serve(Router::new().route("/chat/completions", post(openai_echo))).await;

    let result = executor()
        .execute(&job(&base, ApiFormat::OpenAI), "hello")
        .await;

    assert!(result.success, "error: {}", result.error());
    assert_eq!(result.provider_name, "local");
    assert_eq!(result.model_nickname, "m1");
    assert_eq!(result.message_content, "Bearer sk-test|model-one|0.7|1000");
    assert_eq!(result.input_tokens, 12);
    assert_eq!(result.output_tokens, 30);
    assert_eq!(result.total_tokens, 42);
    assert!(result.duration_seconds >= 0.0);
    assert!(result.tokens_per_second > 0.0);
    assert_eq!(result.tokens_per_second, round_rate(result.tokens_per_second));
    assert_eq!(result.duration_seconds, round_seconds(result.duration_seconds));
    assert!(result.error_message.is_none());
}

#[tokio::test]
async fn test_anthropic_success() {
    let base = serve(Router::new().route("/v1/messages", post(anthropic_echo))).await;

    let result = executor()
        .execute(&job(&base, ApiFormat::Anthropic), "hello")
        .await;

    assert!(result.success, "error: {}", result.error());
    assert_eq!(result.message_content, "sk-test|2023-06-01|false");
    assert_eq!(result.total_tokens, 24);
}

#[tokio::test]
async fn test_trailing_slash_in_base_url() {
    let base = serve(Router::new().route("/chat/completions", post(openai_echo))).await;

    let result = executor()
        .execute(&job(&format!("{}/", base), ApiFormat::OpenAI), "hello")
        .await;

    assert!(result.success, "error: {}", result.error());
}

#[tokio::test]
async fn test_missing_usage_is_estimated() {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async { Json(json!({"choices": [{"message": {"content": "abcdefgh"}}]})) }),
    );
    let base = serve(app).await;

    let result = executor()
        .execute(&job(&base, ApiFormat::OpenAI), "abcdefghijkl")
        .await;

    assert!(result.success);
    assert_eq!(result.input_tokens, 3);
    assert_eq!(result.output_tokens, 2);
    assert_eq!(result.total_tokens, 5);
}

#[tokio::test]
async fn test_anthropic_soft_error_counts_as_success() {
    let app = Router::new().route(
        "/v1/messages",
        post(|| async { Json(json!({"code": 1, "msg": "bad key", "success": false})) }),
    );
    let base = serve(app).await;

    let result = executor()
        .execute(&job(&base, ApiFormat::Anthropic), "hello")
        .await;

    assert!(result.success);
    assert_eq!(result.message_content, "Error: bad key");
    assert!(result.error_message.is_none());
}

// ============================================================================
// Failure Path
// ============================================================================

#[tokio::test]
async fn test_json_error_body() {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": {"message": "rate limited"}})),
            )
        }),
    );
    let base = serve(app).await;

    let result = executor()
        .execute(&job(&base, ApiFormat::OpenAI), "hello")
        .await;

    assert!(!result.success);
    assert_eq!(result.error(), "API request failed: 500 - rate limited");
    assert_eq!(result.total_tokens, 0);
    assert_eq!(result.tokens_per_second, 0.0);
    assert!(result.message_content.is_empty());
}

#[tokio::test]
async fn test_non_json_error_body() {
    let app = Router::new().route(
        "/v1/messages",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream exploded") }),
    );
    let base = serve(app).await;

    let result = executor()
        .execute(&job(&base, ApiFormat::Anthropic), "hello")
        .await;

    assert!(!result.success);
    assert_eq!(result.error(), "API request failed: 502 Bad Gateway");
}

#[tokio::test]
async fn test_unknown_route_fails() {
    let base = serve(Router::new().route("/chat/completions", post(openai_echo))).await;

    let result = executor()
        .execute(&job(&base, ApiFormat::Anthropic), "hello")
        .await;

    assert!(!result.success);
    assert!(result.error().starts_with("API request failed: 404"));
}

#[tokio::test]
async fn test_invalid_json_on_success() {
    let app = Router::new().route("/chat/completions", post(|| async { "not json" }));
    let base = serve(app).await;

    let result = executor()
        .execute(&job(&base, ApiFormat::OpenAI), "hello")
        .await;

    assert!(!result.success);
    assert!(result.error().starts_with("Invalid JSON response"));
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = executor()
        .execute(&job(&format!("http://{}", addr), ApiFormat::OpenAI), "hello")
        .await;

    assert!(!result.success);
    assert!(result.error().starts_with("HTTP error"));
    assert_eq!(result.duration_seconds, 0.0);
}

#[tokio::test]
async fn test_request_timeout() {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Json(json!({}))
        }),
    );
    let base = serve(app).await;

    let executor = HttpExecutor::new(Some(Duration::from_millis(200))).unwrap();
    assert_eq!(executor.request_timeout(), Some(Duration::from_millis(200)));

    let started = Instant::now();
    let result = executor
        .execute(&job(&base, ApiFormat::OpenAI), "hello")
        .await;

    assert!(!result.success);
    assert!(started.elapsed() < Duration::from_secs(5));
}
