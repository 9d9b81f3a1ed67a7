use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{FileLoader, LlmClient};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub active_sessions: usize,
}

pub async fn health_handler<F, L>(State(state): State<AppState<F, L>>) -> impl IntoResponse
where
    F: FileLoader + 'static,
    L: LlmClient + ?Sized + 'static,
{
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            active_sessions: state.session_store.count().await,
        }),
    )
}
