use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;
use tempfile::NamedTempFile;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentFormat};

use super::staging::stage_upload;
use super::text_sanitizer::sanitize_extracted_text;

const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

pub struct PdfAdapter {
    temp_dir: Option<PathBuf>,
    timeout: Duration,
}

impl Default for PdfAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfAdapter {
    pub fn new() -> Self {
        Self {
            temp_dir: None,
            timeout: DEFAULT_EXTRACTION_TIMEOUT,
        }
    }

    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(temp_dir.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Text of every page in page order. Pages with no text come back empty.
    fn extract_pages(path: &Path) -> Result<Vec<String>, FileLoaderError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let page_count = doc.page_count().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        collect_pages(page_count, |page_index| doc.extract_text(page_index))
    }

    fn extract_staged(temp_file: NamedTempFile) -> Result<Vec<String>, FileLoaderError> {
        let pages = Self::extract_pages(temp_file.path());
        drop(temp_file);
        pages
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.format != DocumentFormat::Pdf {
            return Err(FileLoaderError::UnsupportedFormat(
                document.format.extension().to_string(),
            ));
        }

        let temp_file = stage_upload(data, DocumentFormat::Pdf, self.temp_dir.as_deref())?;

        let pages = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || Self::extract_staged(temp_file)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        let page_count = pages.len();

        let text = join_pages(&pages);

        tracing::info!(page_count, characters = text.len(), "PDF text extraction complete");

        if text.trim().is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }

        Ok(text)
    }
}

/// Pulls every page through `extract`. The first failing page fails the
/// whole document.
fn collect_pages<E, F>(page_count: usize, mut extract: F) -> Result<Vec<String>, FileLoaderError>
where
    E: Display,
    F: FnMut(usize) -> Result<String, E>,
{
    (0..page_count)
        .map(|page_index| {
            extract(page_index).map_err(|e| {
                FileLoaderError::ExtractionFailed(format!("page {}: {e}", page_index + 1))
            })
        })
        .collect()
}

/// One entry per page, empty pages included, separated by a newline.
fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .map(|page| sanitize_extracted_text(page))
        .collect::<Vec<_>>()
        .join("\n")
}
