//! In-memory session store adapter.
//!
//! Process-wide keyed map behind an async `RwLock`. The map lock is held
//! only for lookup and insert; each session carries its own mutex so turns
//! for one session serialize without blocking any other session.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::SessionId;
use crate::domain::intake::Session;
use crate::ports::{SessionHandle, SessionStore, SessionStoreError};

/// In-memory session store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// True when no sessions are held.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self) -> SessionHandle {
        let id = SessionId::new();
        let handle: SessionHandle = Arc::new(Mutex::new(Session::new(id)));
        self.sessions.write().await.insert(id, Arc::clone(&handle));
        handle
    }

    async fn get(&self, id: SessionId) -> Result<SessionHandle, SessionStoreError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionStoreError::NotFound(id))
    }

    async fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            // Locked means a turn is in flight; keep and revisit next sweep.
            Err(_) => true,
            Ok(session) => now - session.idle_since() < max_idle,
        });
        before - sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_get_returns_same_session() {
        let store = InMemorySessionStore::new();
        let handle = store.create().await;
        let id = handle.lock().await.id();

        let fetched = store.get(id).await.unwrap();
        assert_eq!(fetched.lock().await.id(), id);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn get_unknown_id_fails() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();

        assert_eq!(
            store.get(id).await.unwrap_err(),
            SessionStoreError::NotFound(id)
        );
        // Lookup must not fabricate a session.
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn created_sessions_get_distinct_ids() {
        let store = InMemorySessionStore::new();
        let a = store.create().await.lock().await.id();
        let b = store.create().await.lock().await.id();

        assert_ne!(a, b);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn evict_idle_removes_stale_sessions() {
        let store = InMemorySessionStore::new();
        store.create().await;
        store.create().await;

        // A zero allowance makes every unlocked session stale.
        let evicted = store.evict_idle(Duration::zero()).await;
        assert_eq!(evicted, 2);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn evict_idle_keeps_fresh_sessions() {
        let store = InMemorySessionStore::new();
        store.create().await;

        let evicted = store.evict_idle(Duration::hours(1)).await;
        assert_eq!(evicted, 0);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn evict_idle_skips_sessions_mid_turn() {
        let store = InMemorySessionStore::new();
        let handle = store.create().await;

        let _turn = handle.lock().await;
        let evicted = store.evict_idle(Duration::zero()).await;

        assert_eq!(evicted, 0);
        assert_eq!(store.len().await, 1);
    }
}
