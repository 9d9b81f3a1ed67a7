use std::io::Write;

use lexdoc::application::ports::{FileLoader, FileLoaderError};
use lexdoc::domain::{Document, DocumentFormat};
use lexdoc::infrastructure::text_processing::DocxAdapter;

const SAMPLE_DOCX: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/sample.docx"
));

fn docx_document(filename: &str, data: &[u8]) -> Document {
    Document::new(filename.to_string(), DocumentFormat::Docx, data.len() as u64)
}

fn zip_with(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer
            .start_file(*name, zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

#[tokio::test]
async fn given_docx_when_extracting_then_body_paragraphs_are_joined_by_newlines() {
    let adapter = DocxAdapter::new();

    let text = adapter
        .extract_text(SAMPLE_DOCX, &docx_document("nda.docx", SAMPLE_DOCX))
        .await
        .unwrap();

    assert_eq!(
        text,
        "NON-DISCLOSURE AGREEMENT\n\
         This agreement is made between Acme & Sons and the Recipient.\n\
         Confidential information must not be disclosed."
    );
}

#[tokio::test]
async fn given_docx_with_table_when_extracting_then_table_text_is_skipped() {
    let adapter = DocxAdapter::new();

    let text = adapter
        .extract_text(SAMPLE_DOCX, &docx_document("nda.docx", SAMPLE_DOCX))
        .await
        .unwrap();

    assert!(!text.contains("Table cell text"));
}

#[tokio::test]
async fn given_bytes_that_are_not_a_zip_when_extracting_then_returns_extraction_failed() {
    let adapter = DocxAdapter::new();
    let garbage = b"PK but not really";

    let result = adapter
        .extract_text(garbage, &docx_document("broken.docx", garbage))
        .await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_zip_without_document_part_when_extracting_then_returns_extraction_failed() {
    let adapter = DocxAdapter::new();
    let data = zip_with(&[("word/styles.xml", "<styles/>")]);

    let result = adapter
        .extract_text(&data, &docx_document("styles-only.docx", &data))
        .await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_docx_with_only_empty_paragraphs_when_extracting_then_returns_no_text_found() {
    let adapter = DocxAdapter::new();
    let data = zip_with(&[(
        "word/document.xml",
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p/><w:p></w:p></w:body></w:document>"#,
    )]);

    let result = adapter
        .extract_text(&data, &docx_document("empty.docx", &data))
        .await;

    assert!(matches!(result, Err(FileLoaderError::NoTextFound(_))));
}

#[tokio::test]
async fn given_extraction_in_custom_temp_dir_when_done_then_dir_is_empty() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let adapter = DocxAdapter::new().with_temp_dir(temp_dir.path());

    adapter
        .extract_text(SAMPLE_DOCX, &docx_document("nda.docx", SAMPLE_DOCX))
        .await
        .unwrap();

    assert!(std::fs::read_dir(temp_dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn given_non_zip_bytes_when_extraction_fails_then_temp_dir_is_empty() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let adapter = DocxAdapter::new().with_temp_dir(temp_dir.path());
    let garbage = b"this is not a zip archive";

    let result = adapter
        .extract_text(garbage, &docx_document("broken.docx", garbage))
        .await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
    assert!(std::fs::read_dir(temp_dir.path()).unwrap().next().is_none());
}
