use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{GenerationParams, LlmClient, LlmClientError};
use crate::domain::Message;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for any OpenAI-compatible `/chat/completions` endpoint (OpenAI,
/// LM Studio, vLLM, ...).
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl OpenAiClient {
    pub fn new(
        base_url: &str,
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
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    fn build_messages(prompt: &str, history: &[Message]) -> Vec<ChatMessage> {
        history
            .iter()
            .map(|message| ChatMessage {
                role: message.role.as_str().to_string(),
                content: message.content.clone(),
            })
            .chain(std::iter::once(ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }))
            .collect()
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
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
        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: Self::build_messages(prompt, history),
            max_tokens: params.max_output_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.without_url().to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.without_url().to_string()))?;

        completion_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| LlmClientError::InvalidResponse("empty choices".to_string()))
    }
}
