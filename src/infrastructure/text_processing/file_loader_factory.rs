use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::FileLoader;
use crate::domain::DocumentFormat;
use crate::presentation::config::ExtractionSettings;

use super::{CompositeFileLoader, DocxAdapter, PdfAdapter, PlainTextAdapter};

pub struct FileLoaderFactory;

impl FileLoaderFactory {
    /// A loader covering every supported format, configured from settings.
    pub fn create(settings: &ExtractionSettings) -> CompositeFileLoader {
        let timeout = Duration::from_secs(settings.timeout_seconds);

        let mut pdf = PdfAdapter::new().with_timeout(timeout);
        let mut docx = DocxAdapter::new().with_timeout(timeout);
        if let Some(dir) = settings.temp_dir.as_deref() {
            tracing::info!(temp_dir = dir, "Staging uploads in configured temp dir");
            pdf = pdf.with_temp_dir(PathBuf::from(dir));
            docx = docx.with_temp_dir(PathBuf::from(dir));
        }

        let pdf: Arc<dyn FileLoader> = Arc::new(pdf);
        let docx: Arc<dyn FileLoader> = Arc::new(docx);
        let text: Arc<dyn FileLoader> = Arc::new(PlainTextAdapter);

        CompositeFileLoader::new(vec![
            (DocumentFormat::Pdf, pdf),
            (DocumentFormat::Docx, docx),
            (DocumentFormat::Text, text),
        ])
    }
}
