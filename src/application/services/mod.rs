mod chat_service;
mod document_service;
pub mod prompt_composer;

pub use chat_service::{ChatExchange, ChatService};
pub use document_service::DocumentService;
pub use prompt_composer::{
    MAX_DOCUMENT_CHARS, compose_system_prompt, compose_turn_prompt, truncate_document,
};
