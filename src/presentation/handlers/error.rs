use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::{FileLoaderError, RepositoryError, SessionHandle, SessionStore};
use crate::domain::{SessionError, SessionId};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

/// A failed request: status code, a stable machine-readable code and a
/// human-readable message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_request", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, code = self.code, error = %self.message, "Request failed");
        } else {
            tracing::warn!(status = %self.status, code = self.code, error = %self.message, "Request rejected");
        }

        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
                code: self.code,
            }),
        )
            .into_response()
    }
}

impl From<FileLoaderError> for ApiError {
    fn from(e: FileLoaderError) -> Self {
        match &e {
            FileLoaderError::UnsupportedFormat(ext) => Self::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "unsupported_format",
                if ext.is_empty() {
                    "Unsupported file format: the file has no extension. Upload a PDF, DOCX or TXT file.".to_string()
                } else {
                    format!("Unsupported file format: .{ext}. Upload a PDF, DOCX or TXT file.")
                },
            ),
            FileLoaderError::ExtractionFailed(_) => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "extraction_failed",
                format!("Error extracting text: {e}"),
            ),
            FileLoaderError::NoTextFound(_) => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "no_text_found",
                format!("Error extracting text: {e}"),
            ),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        let (status, code) = match &e {
            SessionError::DocumentAlreadyLoaded(_) => {
                (StatusCode::CONFLICT, "document_already_loaded")
            }
            SessionError::NoDocument => (StatusCode::CONFLICT, "no_document"),
            SessionError::EmptyQuestion => (StatusCode::BAD_REQUEST, "empty_question"),
            SessionError::InvalidConfig(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_config"),
        };
        Self::new(status, code, e.to_string())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        let (status, code) = match &e {
            RepositoryError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            RepositoryError::CapacityExceeded(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "capacity_exceeded")
            }
        };
        Self::new(status, code, e.to_string())
    }
}

/// Looks a session up by id, turning a miss into a 404.
pub async fn load_session(
    store: &dyn SessionStore,
    session_id: Uuid,
) -> Result<SessionHandle, ApiError> {
    store
        .get(SessionId::from_uuid(session_id))
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("session {session_id}")).into())
}
