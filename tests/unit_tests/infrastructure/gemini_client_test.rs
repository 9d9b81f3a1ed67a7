use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, response::IntoResponse};
use serde_json::{Value, json};

use lexdoc::application::ports::{GenerationParams, LlmClient, LlmClientError};
use lexdoc::domain::Message;
use lexdoc::infrastructure::llm::GeminiClient;

use super::mock_server::spawn_mock_server;

#[derive(Clone, Default)]
struct Captured {
    call: Arc<Mutex<Option<String>>>,
    key: Arc<Mutex<Option<String>>>,
    body: Arc<Mutex<Option<Value>>>,
}

fn gemini_mock(status: StatusCode, response: Value, captured: Captured) -> Router {
    Router::new()
        .route(
            "/{call}",
            post(
                move |State(captured): State<Captured>,
                      Path(call): Path<String>,
                      Query(query): Query<HashMap<String, String>>,
                      Json(body): Json<Value>| async move {
                    *captured.call.lock().unwrap() = Some(call);
                    *captured.key.lock().unwrap() = query.get("key").cloned();
                    *captured.body.lock().unwrap() = Some(body);
                    (status, Json(response)).into_response()
                },
            ),
        )
        .with_state(captured)
}

async fn client_for(router: Router) -> GeminiClient {
    let base_url = spawn_mock_server(router).await;
    GeminiClient::new("test-key", "gemini-test", Duration::from_secs(5))
        .unwrap()
        .with_base_url(base_url)
}

fn success_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn given_successful_response_when_completing_then_returns_candidate_text() {
    let captured = Captured::default();
    let client = client_for(gemini_mock(
        StatusCode::OK,
        success_body("The lease is for 12 months."),
        captured.clone(),
    ))
    .await;

    let text = client
        .complete("PROMPT", &[], &GenerationParams::new(0.2, 2048))
        .await
        .unwrap();

    assert_eq!(text, "The lease is for 12 months.");
    assert_eq!(
        captured.call.lock().unwrap().as_deref(),
        Some("gemini-test:generateContent")
    );
    assert_eq!(captured.key.lock().unwrap().as_deref(), Some("test-key"));
}

#[tokio::test]
async fn given_generation_params_when_completing_then_request_carries_them() {
    let captured = Captured::default();
    let client = client_for(gemini_mock(StatusCode::OK, success_body("ok"), captured.clone())).await;

    client
        .complete("PROMPT", &[], &GenerationParams::new(0.5, 300))
        .await
        .unwrap();

    let body = captured.body.lock().unwrap().clone().unwrap();
    let config = &body["generationConfig"];
    assert_eq!(config["maxOutputTokens"], 300);
    assert!((config["temperature"].as_f64().unwrap() - 0.5).abs() < 1e-6);
    assert!((config["topP"].as_f64().unwrap() - 0.95).abs() < 1e-6);
    assert_eq!(body["contents"].as_array().unwrap().len(), 1);
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "PROMPT");
}

#[tokio::test]
async fn given_history_when_completing_then_assistant_turns_use_model_role() {
    let captured = Captured::default();
    let client = client_for(gemini_mock(StatusCode::OK, success_body("ok"), captured.clone())).await;
    let history = vec![Message::user("Earlier question"), Message::assistant("Earlier answer")];

    client
        .complete("PROMPT", &history, &GenerationParams::new(0.2, 2048))
        .await
        .unwrap();

    let body = captured.body.lock().unwrap().clone().unwrap();
    let roles: Vec<&str> = body["contents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["role"].as_str().unwrap())
        .collect();
    assert_eq!(roles, vec!["user", "model", "user"]);
}

#[tokio::test]
async fn given_rate_limit_status_when_completing_then_returns_rate_limited() {
    let client = client_for(gemini_mock(
        StatusCode::TOO_MANY_REQUESTS,
        json!({ "error": { "code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED" } }),
        Captured::default(),
    ))
    .await;

    let result = client
        .complete("PROMPT", &[], &GenerationParams::new(0.2, 2048))
        .await;

    assert!(matches!(result, Err(LlmClientError::RateLimited)));
}

#[tokio::test]
async fn given_error_status_when_completing_then_error_names_status_and_message() {
    let client = client_for(gemini_mock(
        StatusCode::BAD_REQUEST,
        json!({ "error": { "code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT" } }),
        Captured::default(),
    ))
    .await;

    let result = client
        .complete("PROMPT", &[], &GenerationParams::new(0.2, 2048))
        .await;

    match result {
        Err(LlmClientError::ApiRequestFailed(message)) => {
            assert!(message.contains("400"));
            assert!(message.contains("INVALID_ARGUMENT: API key not valid"));
            assert!(!message.contains("test-key"));
        }
        other => panic!("expected ApiRequestFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn given_response_without_candidates_when_completing_then_returns_invalid_response() {
    let client = client_for(gemini_mock(
        StatusCode::OK,
        json!({ "promptFeedback": { "blockReason": "SAFETY" } }),
        Captured::default(),
    ))
    .await;

    let result = client
        .complete("PROMPT", &[], &GenerationParams::new(0.2, 2048))
        .await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
}

#[tokio::test]
async fn given_unreachable_endpoint_when_completing_then_returns_api_request_failed() {
    let client = GeminiClient::new("test-key", "gemini-test", Duration::from_secs(2))
        .unwrap()
        .with_base_url("http://127.0.0.1:9");

    let result = client
        .complete("PROMPT", &[], &GenerationParams::new(0.2, 2048))
        .await;

    match result {
        Err(LlmClientError::ApiRequestFailed(message)) => assert!(!message.contains("test-key")),
        other => panic!("expected ApiRequestFailed, got {:?}", other),
    }
}
