use std::sync::Arc;

use crate::application::ports::{FileLoader, LlmClient, SessionStore};
use crate::application::services::{ChatService, DocumentService};
use crate::presentation::config::Settings;

pub struct AppState<F, L>
where
    F: FileLoader,
    L: LlmClient + ?Sized,
{
    pub document_service: Arc<DocumentService<F>>,
    pub chat_service: Arc<ChatService<L>>,
    pub session_store: Arc<dyn SessionStore>,
    pub settings: Settings,
}

impl<F, L> Clone for AppState<F, L>
where
    F: FileLoader,
    L: LlmClient + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            document_service: Arc::clone(&self.document_service),
            chat_service: Arc::clone(&self.chat_service),
            session_store: Arc::clone(&self.session_store),
            settings: self.settings.clone(),
        }
    }
}
