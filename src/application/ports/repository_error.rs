#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("capacity exceeded: at most {0} sessions")]
    CapacityExceeded(usize),
}
