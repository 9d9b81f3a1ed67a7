use std::sync::Arc;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentFormat, UploadedDocument, file_extension};

pub struct DocumentService<F>
where
    F: FileLoader,
{
    file_loader: Arc<F>,
}

impl<F> DocumentService<F>
where
    F: FileLoader,
{
    pub fn new(file_loader: Arc<F>) -> Self {
        Self { file_loader }
    }

    /// Turns an uploaded blob into a document with extracted text. The
    /// format comes from the filename's extension.
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn extract(
        &self,
        data: &[u8],
        filename: &str,
    ) -> Result<UploadedDocument, FileLoaderError> {
        let format = DocumentFormat::from_filename(filename).ok_or_else(|| {
            FileLoaderError::UnsupportedFormat(file_extension(filename).unwrap_or_default())
        })?;

        let document = Document::new(filename.to_string(), format, data.len() as u64);

        let text = self.file_loader.extract_text(data, &document).await?;

        if text.trim().is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename));
        }

        let uploaded = UploadedDocument::new(document, text);
        tracing::info!(
            document_id = %uploaded.document().id.as_uuid(),
            format = uploaded.document().format.extension(),
            characters = uploaded.char_count(),
            "Document text extracted"
        );

        Ok(uploaded)
    }
}
