use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use tempfile::NamedTempFile;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, DocumentFormat};

use super::staging::stage_upload;

const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);
const DOCUMENT_PART: &str = "word/document.xml";

/// Reads the body paragraphs of a WordprocessingML (`.docx`) file, one line
/// per paragraph. Tables, content controls, text boxes, headers, footers and
/// styling are dropped.
pub struct DocxAdapter {
    temp_dir: Option<PathBuf>,
    timeout: Duration,
}

impl Default for DocxAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxAdapter {
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

    fn read_document_xml(file: File) -> Result<String, FileLoaderError> {
        let mut archive = zip::ZipArchive::new(file).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to open DOCX container: {e}"))
        })?;

        let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("missing {DOCUMENT_PART}: {e}"))
        })?;

        let mut xml = String::new();
        part.read_to_string(&mut xml).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read {DOCUMENT_PART}: {e}"))
        })?;

        Ok(xml)
    }

    fn extract_staged(temp_file: NamedTempFile) -> Result<Vec<String>, FileLoaderError> {
        let file = temp_file.reopen().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to reopen temp file: {e}"))
        })?;
        let xml = Self::read_document_xml(file);
        drop(temp_file);
        parse_paragraphs(&xml?)
    }
}

/// Collects the text of every `w:p` that is a direct child of `w:body`.
/// Paragraphs nested in tables, content controls (`w:sdt`) or text boxes are
/// not part of that stream.
pub fn parse_paragraphs(xml: &str) -> Result<Vec<String>, FileLoaderError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text_run = false;
    // Open elements before the current event.
    let mut depth = 0usize;
    let mut body_depth: Option<usize> = None;
    // Depth inside w:txbxContent; a text box can sit in a run of a body paragraph.
    let mut skip_depth = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!(
                "malformed {DOCUMENT_PART} at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;
        let is_body_child = body_depth.is_some_and(|body| depth == body + 1);

        match event {
            Event::Start(e) => {
                match e.name().as_ref() {
                    b"w:body" => body_depth = Some(depth),
                    b"w:txbxContent" => skip_depth += 1,
                    b"w:p" if is_body_child => current = Some(String::new()),
                    b"w:t" if skip_depth == 0 => in_text_run = current.is_some(),
                    _ => {}
                }
                depth += 1;
            }
            Event::Empty(e) => match e.name().as_ref() {
                _ if skip_depth > 0 => {}
                b"w:p" if is_body_child => paragraphs.push(String::new()),
                b"w:tab" => push_to(&mut current, "\t"),
                b"w:br" | b"w:cr" => push_to(&mut current, "\n"),
                _ => {}
            },
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                let closes_body_child = body_depth.is_some_and(|body| depth == body + 1);
                match e.name().as_ref() {
                    b"w:body" => body_depth = None,
                    b"w:txbxContent" => skip_depth = skip_depth.saturating_sub(1),
                    b"w:p" if closes_body_child => {
                        if let Some(paragraph) = current.take() {
                            paragraphs.push(paragraph);
                        }
                    }
                    b"w:t" => in_text_run = false,
                    _ => {}
                }
            }
            Event::Text(t) if in_text_run && skip_depth == 0 => {
                let text = std::str::from_utf8(&t).map_err(|e| {
                    FileLoaderError::ExtractionFailed(format!("invalid UTF-8 in document: {e}"))
                })?;
                push_to(&mut current, text);
            }
            Event::GeneralRef(r) if in_text_run && skip_depth == 0 => {
                let name = std::str::from_utf8(&r).unwrap_or_default();
                if let Some(resolved) = resolve_entity(name) {
                    push_to(&mut current, &resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn push_to(current: &mut Option<String>, text: &str) {
    if let Some(paragraph) = current.as_mut() {
        paragraph.push_str(text);
    }
}

/// Resolves `&name;` references: the five predefined XML entities and
/// numeric character references.
fn resolve_entity(name: &str) -> Option<String> {
    let resolved = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value)?
        }
    };
    Some(resolved.to_string())
}

#[async_trait]
impl FileLoader for DocxAdapter {
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
        if document.format != DocumentFormat::Docx {
            return Err(FileLoaderError::UnsupportedFormat(
                document.format.extension().to_string(),
            ));
        }

        let temp_file = stage_upload(data, DocumentFormat::Docx, self.temp_dir.as_deref())?;

        let paragraphs = tokio::time::timeout(
            self.timeout,
            tokio::task::spawn_blocking(move || Self::extract_staged(temp_file)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("DOCX extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(
            paragraph_count = paragraphs.len(),
            "DOCX text extraction complete"
        );

        let text = paragraphs.join("\n");
        if text.trim().is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }

        Ok(text)
    }
}
