use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentFormat};

/// Decodes `.txt` uploads as UTF-8, verbatim.
pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.format != DocumentFormat::Text {
            return Err(FileLoaderError::UnsupportedFormat(
                document.format.extension().to_string(),
            ));
        }

        let text = String::from_utf8(data.to_vec())
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("not valid UTF-8: {e}")))?;

        if text.trim().is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }

        Ok(text)
    }
}
