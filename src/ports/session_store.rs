//! Session store port: process-wide session ownership.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::intake::Session;

/// Shared handle to one session.
///
/// Holding the lock serializes the whole turn for that session — including
/// the upstream language-model call — while leaving every other session
/// free. This is the per-session single-writer discipline that keeps
/// concurrent turns from losing updates.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Port over session creation and lookup.
///
/// The store exclusively owns all sessions; other components get mutable
/// access scoped to one turn via the handle's lock. Creation is explicit —
/// lookups never fabricate a session for an unknown identifier.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Generates a fresh identifier and installs a new `Initial`-stage
    /// session.
    async fn create(&self) -> SessionHandle;

    /// Looks up an existing session. Never auto-creates.
    async fn get(&self, id: SessionId) -> Result<SessionHandle, SessionStoreError>;

    /// Removes sessions idle for longer than `max_idle`, skipping any
    /// session currently mid-turn. Returns how many were evicted.
    async fn evict_idle(&self, max_idle: chrono::Duration) -> usize;
}

/// Session store failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session not found: {0}")]
    NotFound(SessionId),
}
