use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::application::ports::{FileLoader, LlmClient};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::{ApiError, load_session};
use super::session_types::{
    AskRequest, AskResponse, ClearHistoryResponse, MessageView, SessionSnapshot,
};

/// One chat turn. Provider failures still answer 200: the error text is the
/// assistant's reply.
#[tracing::instrument(skip(state, request))]
pub async fn ask_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError>
where
    F: FileLoader + 'static,
    L: LlmClient + ?Sized + 'static,
{
    tracing::debug!(question = %sanitize_prompt(&request.question), "Processing chat turn");

    let handle = load_session(state.session_store.as_ref(), session_id).await?;
    let mut session = handle.lock().await;

    let exchange = state
        .chat_service
        .ask(&mut session, &request.question)
        .await?;

    Ok(Json(AskResponse {
        question: MessageView::from(&exchange.question),
        answer: MessageView::from(&exchange.answer),
        state: session.state().as_str(),
    }))
}

#[tracing::instrument(skip(state))]
pub async fn clear_history_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ClearHistoryResponse>, ApiError>
where
    F: FileLoader + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let handle = load_session(state.session_store.as_ref(), session_id).await?;
    let mut session = handle.lock().await;

    let cleared = session.clear_history();
    tracing::info!(session_id = %session.id, cleared, "Chat history cleared");

    Ok(Json(ClearHistoryResponse {
        cleared,
        session: SessionSnapshot::from_session(&session),
    }))
}
