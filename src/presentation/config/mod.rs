mod environment;
mod scaffold_config;
mod settings;

pub use environment::Environment;
pub use scaffold_config::ScaffoldConfig;
pub use settings::{
    ChatSettings, ExtractionSettings, LlmProvider, LlmSettings, LoggingSettings, ServerSettings,
    SessionSettings, Settings,
};
