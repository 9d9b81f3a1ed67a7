mod gemini_client;
mod llm_client_factory;
mod openai_client;
mod scaffold_llm_client;

pub use gemini_client::{DEFAULT_GEMINI_MODEL, GeminiClient};
pub use llm_client_factory::{LlmClientFactory, LlmClientFactoryError};
pub use openai_client::{OPENAI_BASE_URL, OpenAiClient};
pub use scaffold_llm_client::ScaffoldLlmClient;
