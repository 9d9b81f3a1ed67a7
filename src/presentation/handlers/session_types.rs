use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AnalysisConfig, Message, Session, UploadedDocument};

#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub id: String,
    pub state: &'static str,
    pub document: Option<DocumentSummary>,
    pub config: ConfigView,
    pub messages: Vec<MessageView>,
    pub created_at: DateTime<Utc>,
}

impl SessionSnapshot {
    pub fn from_session(session: &Session) -> Self {
        Self {
            id: session.id.to_string(),
            state: session.state().as_str(),
            document: session.document().map(DocumentSummary::from_uploaded),
            config: ConfigView::from(&session.config),
            messages: session.messages().iter().map(MessageView::from).collect(),
            created_at: session.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentSummary {
    pub id: String,
    pub filename: String,
    pub format: &'static str,
    pub size_bytes: u64,
    pub total_chars: usize,
    pub extracted_at: DateTime<Utc>,
}

impl DocumentSummary {
    pub fn from_uploaded(uploaded: &UploadedDocument) -> Self {
        let document = uploaded.document();
        Self {
            id: document.id.as_uuid().to_string(),
            filename: document.filename.clone(),
            format: document.format.extension(),
            size_bytes: document.size_bytes,
            total_chars: uploaded.char_count(),
            extracted_at: uploaded.extracted_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigView {
    pub analysis_type: &'static str,
    pub language: &'static str,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl From<&AnalysisConfig> for ConfigView {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            analysis_type: config.analysis_type.as_str(),
            language: config.language.as_str(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageView {
    pub id: String,
    pub role: &'static str,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            role: message.role.as_str(),
            content: message.content.clone(),
            created_at: message.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub document: DocumentSummary,
    pub preview: String,
    pub introduction: MessageView,
    pub session: SessionSnapshot,
}

/// Fields left out keep their current value. Enumerations travel as their
/// display names, e.g. `"Contract Review"`.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigUpdateRequest {
    pub analysis_type: Option<String>,
    pub language: Option<String>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub question: MessageView,
    pub answer: MessageView,
    pub state: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ClearHistoryResponse {
    pub cleared: usize,
    pub session: SessionSnapshot,
}
