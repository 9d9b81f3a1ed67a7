use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use lexdoc::application::ports::SessionStore;
use lexdoc::application::services::{ChatService, DocumentService};
use lexdoc::infrastructure::llm::LlmClientFactory;
use lexdoc::infrastructure::observability::{TracingConfig, init_tracing};
use lexdoc::infrastructure::persistence::{InMemorySessionStore, spawn_idle_session_sweeper};
use lexdoc::infrastructure::text_processing::FileLoaderFactory;
use lexdoc::presentation::{AppState, Environment, ScaffoldConfig, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        TracingConfig::from_settings(environment, &settings.logging),
        settings.server.port,
    );

    let scaffold_config = ScaffoldConfig::from_env();
    let llm_client = LlmClientFactory::create(&settings.llm, &scaffold_config)
        .context("Failed to create model client")?;
    let file_loader = Arc::new(FileLoaderFactory::create(&settings.extraction));

    let document_service = Arc::new(DocumentService::new(file_loader));
    let chat_service = Arc::new(ChatService::new(
        llm_client,
        settings.chat.replay_history,
        Duration::from_millis(settings.chat.response_delay_ms),
    ));
    let session_store: Arc<dyn SessionStore> =
        Arc::new(InMemorySessionStore::new(settings.sessions.max_sessions));

    spawn_idle_session_sweeper(
        Arc::clone(&session_store),
        Duration::from_secs(settings.sessions.idle_timeout_minutes.saturating_mul(60)),
        Duration::from_secs(settings.sessions.sweep_interval_seconds.max(1)),
    );

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server host/port")?;

    let state = AppState {
        document_service,
        chat_service,
        session_store,
        settings,
    };

    let router = create_router(state);

    tracing::info!(%addr, environment = %environment, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
