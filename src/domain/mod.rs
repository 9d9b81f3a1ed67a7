mod analysis;
mod conversation;
mod document;
mod document_id;
mod message;
mod message_id;
mod message_role;
mod session;
mod session_error;
mod session_id;

pub use analysis::{
    AnalysisConfig, AnalysisConfigUpdate, AnalysisType, DEFAULT_MAX_OUTPUT_TOKENS,
    DEFAULT_TEMPERATURE, Language, MAX_OUTPUT_TOKENS_RANGE, MAX_OUTPUT_TOKENS_STEP,
    TEMPERATURE_RANGE, TEMPERATURE_STEP,
};
pub use conversation::Conversation;
pub use document::{Document, DocumentFormat, PREVIEW_CHARS, UploadedDocument, file_extension};
pub use document_id::DocumentId;
pub use message::Message;
pub use message_id::MessageId;
pub use message_role::MessageRole;
pub use session::{Session, SessionState};
pub use session_error::SessionError;
pub use session_id::SessionId;
