use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{FileLoader, LlmClient};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    ask_handler, clear_history_handler, create_session_handler, delete_session_handler,
    get_session_handler, health_handler, index_handler, options_handler, update_config_handler,
    upload_document_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<F, L>(state: AppState<F, L>) -> Router
where
    F: FileLoader + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let upload_limit = DefaultBodyLimit::max(state.settings.server.max_upload_bytes());

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler::<F, L>))
        .route("/api/v1/options", get(options_handler::<F, L>))
        .route("/api/v1/sessions", post(create_session_handler::<F, L>))
        .route(
            "/api/v1/sessions/{session_id}",
            get(get_session_handler::<F, L>).delete(delete_session_handler::<F, L>),
        )
        .route(
            "/api/v1/sessions/{session_id}/document",
            post(upload_document_handler::<F, L>).layer(upload_limit),
        )
        .route(
            "/api/v1/sessions/{session_id}/config",
            put(update_config_handler::<F, L>),
        )
        .route(
            "/api/v1/sessions/{session_id}/messages",
            post(ask_handler::<F, L>).delete(clear_history_handler::<F, L>),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
