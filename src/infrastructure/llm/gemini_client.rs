use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::ports::{GenerationParams, LlmClient, LlmClientError};
use crate::domain::{Message, MessageRole};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client for the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmClientError::ApiRequestFailed(format!("http client: {e}")))?;

        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Points the client at a different API root, e.g. a proxy or a test
    /// server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn build_contents(prompt: &str, history: &[Message]) -> Vec<Content> {
        history
            .iter()
            .map(|message| Content {
                role: gemini_role(message.role).to_string(),
                parts: vec![Part {
                    text: message.content.clone(),
                }],
            })
            .chain(std::iter::once(Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }))
            .collect()
    }
}

fn gemini_role(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => "user",
        MessageRole::Assistant => "model",
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    top_p: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text(response: GenerateContentResponse) -> Result<String, LlmClientError> {
    let text: String = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(LlmClientError::InvalidResponse(
            "no text in response candidates".to_string(),
        ));
    }

    Ok(text)
}

fn describe_http_error(status: StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|wrapper| {
            let message = wrapper.error.message?;
            Some(match wrapper.error.status {
                Some(status_text) if !status_text.is_empty() => {
                    format!("{status_text}: {message}")
                }
                _ => message,
            })
        })
        .unwrap_or_else(|| body.to_string());

    format!("HTTP {}: {}", status, message)
}

#[async_trait]
impl LlmClient for GeminiClient {
    #[tracing::instrument(
        skip(self, prompt, history),
        fields(model = %self.model, history_len = history.len())
    )]
    async fn complete(
        &self,
        prompt: &str,
        history: &[Message],
        params: &GenerationParams,
    ) -> Result<String, LlmClientError> {
        let request_body = GenerateContentRequest {
            contents: Self::build_contents(prompt, history),
            generation_config: GenerationConfig {
                temperature: params.temperature,
                max_output_tokens: params.max_output_tokens,
                top_p: params.top_p,
            },
        };

        let url = format!("{}/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.without_url().to_string()))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(describe_http_error(
                status, &body,
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.without_url().to_string()))?;

        let text = extract_text(parsed)?;
        tracing::info!(characters = text.len(), "Gemini completion received");
        Ok(text)
    }
}
