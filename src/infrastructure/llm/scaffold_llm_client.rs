use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{GenerationParams, LlmClient, LlmClientError};
use crate::domain::Message;

const QUESTION_MARKER: &str = "User question: ";

/// Stands in for a real provider while developing the UI: echoes the user's
/// question back without any network call.
pub struct ScaffoldLlmClient {
    delay: Duration,
}

impl ScaffoldLlmClient {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl LlmClient for ScaffoldLlmClient {
    async fn complete(
        &self,
        prompt: &str,
        history: &[Message],
        params: &GenerationParams,
    ) -> Result<String, LlmClientError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let question = prompt
            .rsplit_once(QUESTION_MARKER)
            .map(|(_, question)| question)
            .unwrap_or(prompt);

        tracing::debug!(
            history_len = history.len(),
            temperature = params.temperature,
            max_output_tokens = params.max_output_tokens,
            "Scaffold mode: echoing question"
        );

        Ok(format!("Echo: {}", question))
    }
}
