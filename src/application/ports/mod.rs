mod file_loader;
mod llm_client;
mod repository_error;
mod session_store;

pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{GenerationParams, LlmClient, LlmClientError, TOP_P};
pub use repository_error::RepositoryError;
pub use session_store::{SessionHandle, SessionStore};
