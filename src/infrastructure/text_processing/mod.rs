mod composite_file_loader;
mod docx_adapter;
mod file_loader_factory;
mod pdf_adapter;
mod plain_text_adapter;
mod staging;
mod text_sanitizer;

pub use composite_file_loader::CompositeFileLoader;
pub use docx_adapter::{DocxAdapter, parse_paragraphs};
pub use file_loader_factory::FileLoaderFactory;
pub use pdf_adapter::PdfAdapter;
pub use plain_text_adapter::PlainTextAdapter;
pub use text_sanitizer::sanitize_extracted_text;
