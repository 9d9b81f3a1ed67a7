use chrono::{DateTime, Utc};

use super::DocumentId;

/// Number of characters shown in an upload preview.
pub const PREVIEW_CHARS: usize = 2_000;

/// Upload metadata, known before any text has been extracted.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    pub format: DocumentFormat,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Text,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 3] = [Self::Pdf, Self::Docx, Self::Text];

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn from_filename(filename: &str) -> Option<Self> {
        file_extension(filename).and_then(|ext| Self::from_extension(&ext))
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Text => "txt",
        }
    }
}

/// Lowercased text after the last `.` of a filename, if there is one.
pub fn file_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

impl Document {
    pub fn new(filename: String, format: DocumentFormat, size_bytes: u64) -> Self {
        Self {
            id: DocumentId::new(),
            filename,
            format,
            size_bytes,
        }
    }
}

/// A document whose text has been extracted. The text is never mutated.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    document: Document,
    text: String,
    extracted_at: DateTime<Utc>,
}

impl UploadedDocument {
    pub fn new(document: Document, text: String) -> Self {
        Self {
            document,
            text,
            extracted_at: Utc::now(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn filename(&self) -> &str {
        &self.document.filename
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn extracted_at(&self) -> DateTime<Utc> {
        self.extracted_at
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// First [`PREVIEW_CHARS`] characters, with a trailing `...` when cut.
    pub fn preview(&self) -> String {
        match self.text.char_indices().nth(PREVIEW_CHARS) {
            Some((end, _)) => format!("{}...", &self.text[..end]),
            None => self.text.clone(),
        }
    }
}
