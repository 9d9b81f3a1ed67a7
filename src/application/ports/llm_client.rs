use async_trait::async_trait;

use crate::domain::Message;

/// Nucleus-sampling value sent with every request. Not user-configurable.
pub const TOP_P: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
}

impl GenerationParams {
    pub fn new(temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            temperature,
            max_output_tokens,
            top_p: TOP_P,
        }
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends `prompt` as a new user turn after `history` and returns the
    /// model's text completion.
    async fn complete(
        &self,
        prompt: &str,
        history: &[Message],
        params: &GenerationParams,
    ) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
