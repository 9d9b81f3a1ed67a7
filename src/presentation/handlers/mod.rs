mod analysis_config;
mod chat;
mod error;
mod health;
mod index;
mod options;
pub mod session_types;
mod sessions;
mod upload;

pub use analysis_config::update_config_handler;
pub use chat::{ask_handler, clear_history_handler};
pub use error::{ApiError, ErrorResponse};
pub use health::health_handler;
pub use index::index_handler;
pub use options::options_handler;
pub use sessions::{create_session_handler, delete_session_handler, get_session_handler};
pub use upload::upload_document_handler;
