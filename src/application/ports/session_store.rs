use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Session, SessionId};

use super::RepositoryError;

/// Shared handle to one live session. Holding the lock serializes the
/// session's interactions.
pub type SessionHandle = Arc<Mutex<Session>>;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, session: Session) -> Result<SessionHandle, RepositoryError>;

    async fn get(&self, id: SessionId) -> Result<Option<SessionHandle>, RepositoryError>;

    async fn remove(&self, id: SessionId) -> Result<bool, RepositoryError>;

    /// Drops sessions with no activity for longer than `idle_for`. Sessions
    /// whose lock is currently held count as active.
    async fn evict_idle(&self, idle_for: Duration) -> Result<usize, RepositoryError>;

    async fn count(&self) -> usize;
}
