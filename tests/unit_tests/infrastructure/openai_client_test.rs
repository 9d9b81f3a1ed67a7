use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Json;
use serde_json::{Value, json};

use lexdoc::application::ports::{GenerationParams, LlmClient, LlmClientError};
use lexdoc::domain::Message;
use lexdoc::infrastructure::llm::OpenAiClient;

use super::mock_server::spawn_mock_server;

#[derive(Clone, Default)]
struct Captured {
    authorization: Arc<Mutex<Option<String>>>,
    body: Arc<Mutex<Option<Value>>>,
}

fn openai_mock(status: StatusCode, response: Value, captured: Captured) -> Router {
    Router::new()
        .route(
            "/chat/completions",
            post(
                move |State(captured): State<Captured>,
                      headers: HeaderMap,
                      Json(body): Json<Value>| async move {
                    *captured.authorization.lock().unwrap() = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(String::from);
                    *captured.body.lock().unwrap() = Some(body);
                    (status, Json(response)).into_response()
                },
            ),
        )
        .with_state(captured)
}

async fn client_for(router: Router) -> OpenAiClient {
    let base_url = spawn_mock_server(router).await;
    OpenAiClient::new(&base_url, "sk-test", "gpt-test", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn given_successful_response_when_completing_then_returns_first_choice() {
    let captured = Captured::default();
    let client = client_for(openai_mock(
        StatusCode::OK,
        json!({ "choices": [{ "message": { "role": "assistant", "content": "Clause 4 covers payment." } }] }),
        captured.clone(),
    ))
    .await;
    let history = vec![Message::user("Earlier"), Message::assistant("Reply")];

    let text = client
        .complete("PROMPT", &history, &GenerationParams::new(0.3, 400))
        .await
        .unwrap();

    assert_eq!(text, "Clause 4 covers payment.");
    assert_eq!(
        captured.authorization.lock().unwrap().as_deref(),
        Some("Bearer sk-test")
    );
    let body = captured.body.lock().unwrap().clone().unwrap();
    assert_eq!(body["model"], "gpt-test");
    assert_eq!(body["max_tokens"], 400);
    assert_eq!(body["messages"].as_array().unwrap().len(), 3);
    assert_eq!(body["messages"][1]["role"], "assistant");
    assert_eq!(body["messages"][2]["content"], "PROMPT");
}

#[tokio::test]
async fn given_rate_limit_status_when_completing_then_returns_rate_limited() {
    let client = client_for(openai_mock(
        StatusCode::TOO_MANY_REQUESTS,
        json!({ "error": { "message": "slow down" } }),
        Captured::default(),
    ))
    .await;

    let result = client
        .complete("PROMPT", &[], &GenerationParams::new(0.2, 2048))
        .await;

    assert!(matches!(result, Err(LlmClientError::RateLimited)));
}

#[tokio::test]
async fn given_empty_choices_when_completing_then_returns_invalid_response() {
    let client = client_for(openai_mock(
        StatusCode::OK,
        json!({ "choices": [] }),
        Captured::default(),
    ))
    .await;

    let result = client
        .complete("PROMPT", &[], &GenerationParams::new(0.2, 2048))
        .await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
}

#[tokio::test]
async fn given_unreachable_endpoint_when_completing_then_error_omits_endpoint_url() {
    let client = OpenAiClient::new(
        "http://127.0.0.1:9/private-gateway",
        "sk-test",
        "gpt-test",
        Duration::from_secs(2),
    )
    .unwrap();

    let result = client
        .complete("PROMPT", &[], &GenerationParams::new(0.2, 2048))
        .await;

    match result {
        Err(LlmClientError::ApiRequestFailed(message)) => {
            assert!(!message.contains("private-gateway"));
            assert!(!message.contains("127.0.0.1"));
        }
        other => panic!("expected ApiRequestFailed, got {:?}", other),
    }
}
