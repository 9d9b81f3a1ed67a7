use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::application::ports::{FileLoader, LlmClient, RepositoryError};
use crate::domain::{AnalysisConfig, Session, SessionId};
use crate::presentation::state::AppState;

use super::error::{ApiError, load_session};
use super::session_types::SessionSnapshot;

#[tracing::instrument(skip(state))]
pub async fn create_session_handler<F, L>(
    State(state): State<AppState<F, L>>,
) -> Result<(StatusCode, Json<SessionSnapshot>), ApiError>
where
    F: FileLoader + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let handle = state
        .session_store
        .insert(Session::new(AnalysisConfig::default()))
        .await?;
    let session = handle.lock().await;

    tracing::info!(session_id = %session.id, "Session created");

    Ok((StatusCode::CREATED, Json(SessionSnapshot::from_session(&session))))
}

#[tracing::instrument(skip(state))]
pub async fn get_session_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, ApiError>
where
    F: FileLoader + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let handle = load_session(state.session_store.as_ref(), session_id).await?;
    let mut session = handle.lock().await;
    session.touch();

    Ok(Json(SessionSnapshot::from_session(&session)))
}

#[tracing::instrument(skip(state))]
pub async fn delete_session_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
    F: FileLoader + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let removed = state
        .session_store
        .remove(SessionId::from_uuid(session_id))
        .await?;

    if !removed {
        return Err(RepositoryError::NotFound(format!("session {session_id}")).into());
    }

    tracing::info!(%session_id, "Session ended");
    Ok(StatusCode::NO_CONTENT)
}
