use std::fmt;

use chrono::{DateTime, Utc};

use super::{AnalysisConfig, Conversation, Message, SessionError, SessionId, UploadedDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    NoDocument,
    DocumentLoaded,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::NoDocument => "no_document",
            SessionState::DocumentLoaded => "document_loaded",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything one chat session owns: its history, at most one document and
/// the live analysis configuration.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub config: AnalysisConfig,
    conversation: Conversation,
    document: Option<UploadedDocument>,
    pub created_at: DateTime<Utc>,
    last_active_at: DateTime<Utc>,
}

impl Session {
    pub fn new(config: AnalysisConfig) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new(),
            config,
            conversation: Conversation::new(),
            document: None,
            created_at: now,
            last_active_at: now,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.document.is_some() {
            SessionState::DocumentLoaded
        } else {
            SessionState::NoDocument
        }
    }

    pub fn document(&self) -> Option<&UploadedDocument> {
        self.document.as_ref()
    }

    /// Installs the session's document. There is no way back to
    /// [`SessionState::NoDocument`] other than ending the session.
    pub fn install_document(
        &mut self,
        document: UploadedDocument,
    ) -> Result<&UploadedDocument, SessionError> {
        if let Some(existing) = &self.document {
            return Err(SessionError::DocumentAlreadyLoaded(
                existing.filename().to_string(),
            ));
        }
        self.touch();
        Ok(&*self.document.insert(document))
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    pub fn append_message(&mut self, message: Message) -> &Message {
        self.touch();
        self.conversation.append(message)
    }

    /// Empties the history. The document, if any, stays loaded.
    pub fn clear_history(&mut self) -> usize {
        self.touch();
        self.conversation.clear()
    }

    pub fn last_active_at(&self) -> DateTime<Utc> {
        self.last_active_at
    }

    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }
}
