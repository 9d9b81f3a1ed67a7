use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File};
use serde::Deserialize;

use crate::infrastructure::llm::DEFAULT_GEMINI_MODEL;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub chat: ChatSettings,
    pub extraction: ExtractionSettings,
    pub sessions: SessionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_size_mb: usize,
}

impl ServerSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_size_mb.saturating_mul(1024 * 1024)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "lmstudio")]
    LmStudio,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: String,
    pub chat_model: String,
    #[serde(default)]
    pub base_url: Option<String>,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    /// Send prior turns to the provider along with the new prompt.
    pub replay_history: bool,
    /// Pause before an answer is appended. 0 disables it.
    pub response_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    #[serde(default)]
    pub temp_dir: Option<String>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub max_sessions: usize,
    pub idle_timeout_minutes: u64,
    pub sweep_interval_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Built-in defaults, then `appsettings.<env>.toml` if present, then
    /// `APP_`-prefixed environment variables (`APP_LLM__API_KEY`, ...).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// The built-in defaults alone, with no file or environment overrides.
    pub fn from_defaults() -> Result<Self, ConfigError> {
        Self::defaults()?.build()?.try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let gemini_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();

        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.max_upload_size_mb", 25)?
            .set_default("llm.provider", "gemini")?
            .set_default("llm.api_key", gemini_key)?
            .set_default("llm.chat_model", DEFAULT_GEMINI_MODEL)?
            .set_default("llm.request_timeout_seconds", 120)?
            .set_default("chat.replay_history", true)?
            .set_default("chat.response_delay_ms", 500)?
            .set_default("extraction.timeout_seconds", 30)?
            .set_default("sessions.max_sessions", 1000)?
            .set_default("sessions.idle_timeout_minutes", 60)?
            .set_default("sessions.sweep_interval_seconds", 60)?
            .set_default("logging.level", "info,lexdoc=debug,tower_http=debug")?
            .set_default("logging.enable_json", false)
    }
}
