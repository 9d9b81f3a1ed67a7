use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use crate::application::ports::{RepositoryError, SessionHandle, SessionStore};
use crate::domain::{Session, SessionId};

/// Volatile session storage. Nothing survives a restart.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
    max_sessions: usize,
}

impl InMemorySessionStore {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: Session) -> Result<SessionHandle, RepositoryError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            return Err(RepositoryError::CapacityExceeded(self.max_sessions));
        }

        let id = session.id;
        let handle = Arc::new(Mutex::new(session));
        sessions.insert(id, Arc::clone(&handle));
        Ok(handle)
    }

    async fn get(&self, id: SessionId) -> Result<Option<SessionHandle>, RepositoryError> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn remove(&self, id: SessionId) -> Result<bool, RepositoryError> {
        Ok(self.sessions.write().await.remove(&id).is_some())
    }

    async fn evict_idle(&self, idle_for: Duration) -> Result<usize, RepositoryError> {
        let idle_for = chrono::Duration::from_std(idle_for).unwrap_or(chrono::Duration::MAX);
        let now = Utc::now();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => now.signed_duration_since(session.last_active_at()) <= idle_for,
            Err(_) => true,
        });

        Ok(before - sessions.len())
    }

    async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
