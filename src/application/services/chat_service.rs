use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{GenerationParams, LlmClient};
use crate::domain::{Message, MessageRole, Session, SessionError};
use crate::infrastructure::observability::sanitize_prompt;

use super::prompt_composer::{compose_system_prompt, compose_turn_prompt};

pub struct ChatService<L>
where
    L: LlmClient + ?Sized,
{
    llm_client: Arc<L>,
    replay_history: bool,
    response_delay: Duration,
}

/// The two messages one chat turn appends to a session.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    pub question: Message,
    pub answer: Message,
}

impl<L> ChatService<L>
where
    L: LlmClient + ?Sized,
{
    pub fn new(llm_client: Arc<L>, replay_history: bool, response_delay: Duration) -> Self {
        Self {
            llm_client,
            replay_history,
            response_delay,
        }
    }

    /// Sends one prompt and returns the model's text. Provider failures come
    /// back as an `Error: ...` string instead of an `Err`.
    pub async fn respond(
        &self,
        prompt: &str,
        history: &[Message],
        params: &GenerationParams,
    ) -> String {
        match self.llm_client.complete(prompt, history, params).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Model call failed");
                format!("Error: {}", e)
            }
        }
    }

    /// Runs one user turn against the session's document and live
    /// configuration, appending the question and the answer to its history.
    #[tracing::instrument(skip(self, session, question), fields(session_id = %session.id))]
    pub async fn ask(
        &self,
        session: &mut Session,
        question: &str,
    ) -> Result<ChatExchange, SessionError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(SessionError::EmptyQuestion);
        }

        let document = session.document().ok_or(SessionError::NoDocument)?;
        let config = session.config;

        let system_prompt =
            compose_system_prompt(document.text(), config.analysis_type, config.language);
        let prompt = compose_turn_prompt(&system_prompt, question);
        let history = if self.replay_history {
            replayable_history(session.messages())
        } else {
            Vec::new()
        };

        tracing::debug!(
            question = %sanitize_prompt(question),
            analysis_type = %config.analysis_type,
            language = %config.language,
            history_len = history.len(),
            "Composed chat prompt"
        );

        let question = Message::user(question);

        let params = GenerationParams::new(config.temperature, config.max_output_tokens);
        let response = self.respond(&prompt, &history, &params).await;

        if !self.response_delay.is_zero() {
            tokio::time::sleep(self.response_delay).await;
        }

        // Both halves of the turn land together, so a dropped request leaves
        // the history untouched.
        session.append_message(question.clone());
        let answer = session.append_message(Message::assistant(response)).clone();

        Ok(ChatExchange { question, answer })
    }
}

/// Prior turns as the provider should see them. Providers expect the
/// context to open with a user turn, so leading assistant messages (such as
/// the upload introduction) are skipped.
fn replayable_history(messages: &[Message]) -> Vec<Message> {
    messages
        .iter()
        .skip_while(|m| m.role == MessageRole::Assistant)
        .cloned()
        .collect()
}
