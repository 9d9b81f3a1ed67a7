#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SessionError {
    #[error("a document is already loaded: {0}")]
    DocumentAlreadyLoaded(String),
    #[error("no document has been uploaded yet")]
    NoDocument,
    #[error("question must not be empty")]
    EmptyQuestion,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
