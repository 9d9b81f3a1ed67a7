use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::application::ports::{FileLoader, LlmClient};
use crate::domain::{Message, SessionError, SessionState};
use crate::presentation::state::AppState;

use super::error::{ApiError, load_session};
use super::session_types::{DocumentSummary, MessageView, SessionSnapshot, UploadResponse};

const FILE_FIELD: &str = "file";

struct UploadedFile {
    filename: String,
    data: Vec<u8>,
}

async fn read_file_field(multipart: &mut Multipart) -> Result<UploadedFile, ApiError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(ApiError::bad_request("No file uploaded")),
            Err(e) => {
                return Err(ApiError::new(
                    e.status(),
                    "invalid_upload",
                    format!("Failed to read multipart: {}", e.body_text()),
                ));
            }
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(|e| {
            ApiError::new(
                e.status(),
                "invalid_upload",
                format!("Failed to read file: {}", e.body_text()),
            )
        })?;

        return Ok(UploadedFile {
            filename,
            data: data.to_vec(),
        });
    }
}

/// Extracts the uploaded file's text and makes it the session's document.
/// A session takes exactly one document; later uploads are refused before
/// any extraction work is done.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_document_handler<F, L>(
    State(state): State<AppState<F, L>>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError>
where
    F: FileLoader + 'static,
    L: LlmClient + ?Sized + 'static,
{
    let handle = load_session(state.session_store.as_ref(), session_id).await?;
    let mut session = handle.lock().await;

    if session.state() == SessionState::DocumentLoaded {
        let loaded = session
            .document()
            .map(|d| d.filename().to_string())
            .unwrap_or_default();
        return Err(SessionError::DocumentAlreadyLoaded(loaded).into());
    }

    let upload = read_file_field(&mut multipart).await?;
    tracing::debug!(filename = %upload.filename, bytes = upload.data.len(), "File data received");

    let uploaded = state
        .document_service
        .extract(&upload.data, &upload.filename)
        .await?;

    let installed = session.install_document(uploaded)?;
    let summary = DocumentSummary::from_uploaded(installed);
    let preview = installed.preview();
    let introduction = format!(
        "I've analyzed the document '{}' ({} characters). What would you like to know about it?",
        summary.filename, summary.total_chars
    );

    let introduction = MessageView::from(session.append_message(Message::assistant(introduction)));

    tracing::info!(
        session_id = %session.id,
        filename = %summary.filename,
        total_chars = summary.total_chars,
        "Document loaded into session"
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            document: summary,
            preview,
            introduction,
            session: SessionSnapshot::from_session(&session),
        }),
    ))
}
