use disco_core::session::DiscoverySession;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared, lockable handle to one session.
pub type SessionHandle = Arc<RwLock<DiscoverySession>>;

/// In-memory map from a client key (one per front-end session) to its
/// discovery session.
///
/// Sessions never share state; each lives behind its own lock.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, SessionHandle>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the client's session, creating one with a fresh identifier
    /// only if the client has none yet.
    pub async fn resume(&self, client_key: &str) -> SessionHandle {
        if let Some(existing) = self.get(client_key).await {
            return existing;
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(client_key.to_string())
            .or_insert_with(|| {
                let session = DiscoverySession::new();
                tracing::info!(client_key, session_id = %session.id(), "Started discovery session");
                Arc::new(RwLock::new(session))
            })
            .clone()
    }

    pub async fn get(&self, client_key: &str) -> Option<SessionHandle> {
        let sessions = self.sessions.read().await;
        sessions.get(client_key).cloned()
    }

    /// Rotates the client's session identifier and clears its responses.
    ///
    /// Returns the new identifier.
    pub async fn reset(&self, client_key: &str) -> String {
        let handle = self.resume(client_key).await;
        let mut session = handle.write().await;
        let old_id = session.id().to_string();
        let new_id = session.reset().to_string();
        tracing::info!(client_key, %old_id, %new_id, "Reset discovery session");
        new_id
    }

    /// Drops the client's session entirely.
    pub async fn remove(&self, client_key: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(client_key);
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resume_is_stable() {
        let registry = SessionRegistry::new();

        let first = registry.resume("browser-a").await.read().await.id().to_string();
        let second = registry.resume("browser-a").await.read().await.id().to_string();

        assert_eq!(first, second);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let registry = SessionRegistry::new();

        let a = registry.resume("browser-a").await;
        let b = registry.resume("browser-b").await;
        a.write().await.set_context("Loan Onboarding");
        a.write().await.set_response("Q1", "slow");

        let b = b.read().await;
        assert_ne!(a.read().await.id(), b.id());
        assert_eq!(b.context(), "");
        assert_eq!(b.response("Q1"), "");
    }

    #[tokio::test]
    async fn test_reset_rotates_only_that_client() {
        let registry = SessionRegistry::new();
        let a_before = registry.resume("browser-a").await.read().await.id().to_string();
        let b_before = registry.resume("browser-b").await.read().await.id().to_string();

        let a_after = registry.reset("browser-a").await;

        assert_ne!(a_after, a_before);
        assert_eq!(
            registry.resume("browser-a").await.read().await.id(),
            a_after
        );
        assert_eq!(
            registry.resume("browser-b").await.read().await.id(),
            b_before
        );
    }

    #[tokio::test]
    async fn test_remove() {
        let registry = SessionRegistry::new();
        registry.resume("browser-a").await;
        registry.remove("browser-a").await;

        assert!(registry.is_empty().await);
        assert!(registry.get("browser-a").await.is_none());
    }
}
