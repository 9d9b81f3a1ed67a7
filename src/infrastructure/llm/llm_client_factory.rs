use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::presentation::config::{LlmProvider, LlmSettings, ScaffoldConfig};

use super::{GeminiClient, OPENAI_BASE_URL, OpenAiClient, ScaffoldLlmClient};

#[derive(Debug, thiserror::Error)]
pub enum LlmClientFactoryError {
    #[error("base_url is required for the {0} provider")]
    MissingBaseUrl(&'static str),
    #[error("llm client initialization failed: {0}")]
    InitializationFailed(#[from] LlmClientError),
}

pub struct LlmClientFactory;

impl LlmClientFactory {
    pub fn create(
        settings: &LlmSettings,
        scaffold: &ScaffoldConfig,
    ) -> Result<Arc<dyn LlmClient>, LlmClientFactoryError> {
        if scaffold.enabled {
            tracing::warn!("Scaffold mode enabled: model calls are echoed, not sent");
            return Ok(Arc::new(ScaffoldLlmClient::new(Duration::from_millis(
                scaffold.mock_response_delay_ms,
            ))));
        }

        let timeout = Duration::from_secs(settings.request_timeout_seconds);

        match settings.provider {
            LlmProvider::Gemini => {
                let mut client =
                    GeminiClient::new(settings.api_key.clone(), &settings.chat_model, timeout)?;
                if let Some(base_url) = settings.base_url.as_deref() {
                    client = client.with_base_url(base_url);
                }
                tracing::info!(model = %settings.chat_model, "Using Gemini provider");
                Ok(Arc::new(client))
            }
            LlmProvider::OpenAi => {
                let base_url = settings.base_url.as_deref().unwrap_or(OPENAI_BASE_URL);
                tracing::info!(model = %settings.chat_model, base_url, "Using OpenAI provider");
                Ok(Arc::new(OpenAiClient::new(
                    base_url,
                    settings.api_key.clone(),
                    &settings.chat_model,
                    timeout,
                )?))
            }
            LlmProvider::LmStudio => {
                let base_url = settings
                    .base_url
                    .as_deref()
                    .ok_or(LlmClientFactoryError::MissingBaseUrl("lmstudio"))?;
                tracing::info!(model = %settings.chat_model, base_url, "Using LM Studio provider");
                Ok(Arc::new(OpenAiClient::new(
                    base_url,
                    settings.api_key.clone(),
                    &settings.chat_model,
                    timeout,
                )?))
            }
        }
    }
}
