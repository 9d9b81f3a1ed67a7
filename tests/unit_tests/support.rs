use std::sync::Mutex;

use lexdoc::application::ports::{GenerationParams, LlmClient, LlmClientError};
use lexdoc::domain::{
    AnalysisConfig, Document, DocumentFormat, Message, MessageRole, Session, UploadedDocument,
};

/// What one `complete` call received.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub history: Vec<(MessageRole, String)>,
    pub params: GenerationParams,
}

/// Answers every prompt with a fixed reply and remembers what it was sent.
pub struct RecordingLlmClient {
    reply: String,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingLlmClient {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for RecordingLlmClient {
    async fn complete(
        &self,
        prompt: &str,
        history: &[Message],
        params: &GenerationParams,
    ) -> Result<String, LlmClientError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            history: history
                .iter()
                .map(|m| (m.role, m.content.clone()))
                .collect(),
            params: *params,
        });
        Ok(self.reply.clone())
    }
}

pub struct FailingLlmClient;

#[async_trait::async_trait]
impl LlmClient for FailingLlmClient {
    async fn complete(
        &self,
        _prompt: &str,
        _history: &[Message],
        _params: &GenerationParams,
    ) -> Result<String, LlmClientError> {
        Err(LlmClientError::RateLimited)
    }
}

pub fn uploaded(filename: &str, text: &str) -> UploadedDocument {
    let format = DocumentFormat::from_filename(filename).unwrap_or(DocumentFormat::Text);
    UploadedDocument::new(
        Document::new(filename.to_string(), format, text.len() as u64),
        text.to_string(),
    )
}

pub fn session_with_document(text: &str) -> Session {
    let mut session = Session::new(AnalysisConfig::default());
    session.install_document(uploaded("contract.txt", text)).unwrap();
    session
}

/// Never answers within a test's patience.
pub struct StalledLlmClient;

#[async_trait::async_trait]
impl LlmClient for StalledLlmClient {
    async fn complete(
        &self,
        _prompt: &str,
        _history: &[Message],
        _params: &GenerationParams,
    ) -> Result<String, LlmClientError> {
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        Ok("too late".to_string())
    }
}
