use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::application::ports::{FileLoader, LlmClient};
use crate::domain::{AnalysisConfigUpdate, AnalysisType, Language, SessionError};
use crate::presentation::state::AppState;

use super::error::{ApiError, load_session};
use super::session_types::{ConfigUpdateRequest, SessionSnapshot};

fn parse_update(request: ConfigUpdateRequest) -> Result<AnalysisConfigUpdate, SessionError> {
    let analysis_type = request
        .analysis_type
        .as_deref()
        .map(AnalysisType::from_str)
        .transpose()
        .map_err(SessionError::InvalidConfig)?;
    let language = request
        .language
        .as_deref()
        .map(Language::from_str)
        .transpose()
        .map_err(SessionError::InvalidConfig)?;

    Ok(AnalysisConfigUpdate {
        analysis_type,
        language,
        temperature: request.temperature,
        max_output_tokens: request.max_output_tokens,
    })
}

/// Applies a partial configuration update. The next chat turn picks it up;
/// a rejected update changes nothing.
#[tracing::instrument(skip(state, request))]
pub async fn update_config_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ConfigUpdateRequest>,
) -> Result<Json<SessionSnapshot>, ApiError>
where
    F: FileLoader + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let handle = load_session(state.session_store.as_ref(), session_id).await?;
    let update = parse_update(request)?;

    let mut session = handle.lock().await;
    session.config.apply(update)?;
    session.touch();

    tracing::info!(
        session_id = %session.id,
        analysis_type = %session.config.analysis_type,
        language = %session.config.language,
        temperature = session.config.temperature,
        max_output_tokens = session.config.max_output_tokens,
        "Analysis configuration updated"
    );

    Ok(Json(SessionSnapshot::from_session(&session)))
}
