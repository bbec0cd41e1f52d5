//! Anthropic adapter against a local stand-in Messages API

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Duration;
use thatnightsky_core::error::NightSkyError;
use thatnightsky_core::models::Lang;
use thatnightsky_llm::{AnthropicGenerator, Generator, NarrativeRequest, NarrativeWriter};

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn messages(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };

    if header("x-api-key") != "test-key" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "type": "error",
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            })),
        );
    }
    if header("anthropic-version") != "2023-06-01" || body["max_tokens"] != 300 {
        return (StatusCode::BAD_REQUEST, Json(json!({"type": "error"})));
    }

    let prompt = body["messages"][0]["content"].as_str().unwrap_or_default();
    let reply = if prompt.contains("Ori") {
        "오리온이 빛나던 밤."
    } else {
        "조용한 밤."
    };
    (
        StatusCode::OK,
        Json(json!({
            "id": "msg_test",
            "type": "message",
            "role": "assistant",
            "model": body["model"],
            "content": [{"type": "text", "text": reply}],
            "stop_reason": "end_turn"
        })),
    )
}

fn generator(addr: SocketAddr, key: &str) -> AnthropicGenerator {
    AnthropicGenerator::with_base_url(
        format!("http://{}", addr),
        key,
        "claude-sonnet-4-5",
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_generate_sends_required_headers() {
    let addr = serve(Router::new().route("/v1/messages", post(messages))).await;

    let text = generator(addr, "test-key").generate("보이는 별자리: Ori").await.unwrap();
    assert_eq!(text, "오리온이 빛나던 밤.");
}

#[tokio::test]
async fn test_rejected_key_is_narrative_error() {
    let addr = serve(Router::new().route("/v1/messages", post(messages))).await;

    let err = generator(addr, "wrong").generate("hi").await.unwrap_err();
    assert!(matches!(err, NightSkyError::Narrative { .. }));
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_writer_uses_fallback_when_api_unreachable() {
    // Bind and drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let writer = NarrativeWriter::new(generator(addr, "test-key"));
    let request = NarrativeRequest {
        place: "Busan".to_string(),
        when: "1995-01-15 00:00".to_string(),
        constellations: vec![],
        lang: Lang::En,
    };
    assert_eq!(writer.write_or_fallback(&request).await, "That night. The sky.");
}
