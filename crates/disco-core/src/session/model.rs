use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Returns a fresh opaque session identifier.
pub fn generate_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Session-scoped state of one discovery form.
///
/// Every controller operation receives the session explicitly, so several
/// sessions can live in one process without sharing anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoverySession {
    id: String,
    context: String,
    responses: HashMap<String, String>,
    /// RFC 3339 timestamp of the current identifier
    created_at: String,
}

impl DiscoverySession {
    /// Starts a session with a freshly generated identifier.
    pub fn new() -> Self {
        Self::with_id(generate_session_id())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            context: String::new(),
            responses: HashMap::new(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn set_context(&mut self, context: impl Into<String>) {
        self.context = context.into();
    }

    /// Response entered for `question`, or `""` if none.
    pub fn response(&self, question: &str) -> &str {
        self.responses.get(question).map(String::as_str).unwrap_or("")
    }

    pub fn set_response(&mut self, question: impl Into<String>, response: impl Into<String>) {
        self.responses.insert(question.into(), response.into());
    }

    pub fn responses(&self) -> &HashMap<String, String> {
        &self.responses
    }

    /// Replaces the identifier and clears every per-question response.
    ///
    /// The discovery context is kept. Returns the new identifier.
    pub fn reset(&mut self) -> &str {
        self.id = generate_session_id();
        self.created_at = chrono::Utc::now().to_rfc3339();
        self.responses.clear();
        &self.id
    }
}

impl Default for DiscoverySession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sessions_have_distinct_ids() {
        let a = DiscoverySession::new();
        let b = DiscoverySession::new();
        assert!(!a.id().is_empty());
        assert_ne!(a.id(), b.id());
        assert!(Uuid::parse_str(a.id()).is_ok());
    }

    #[test]
    fn test_id_is_stable_across_edits() {
        let mut session = DiscoverySession::new();
        let id = session.id().to_string();

        session.set_context("Loan Onboarding");
        session.set_response("Q1", "first");
        session.set_response("Q1", "second");

        assert_eq!(session.id(), id);
        assert_eq!(session.response("Q1"), "second");
    }

    #[test]
    fn test_missing_response_reads_as_empty() {
        let session = DiscoverySession::new();
        assert_eq!(session.response("anything"), "");
    }

    #[test]
    fn test_reset_rotates_id_and_clears_responses() {
        let mut session = DiscoverySession::new();
        session.set_context("Loan Onboarding");
        session.set_response("Q1", "Manual PDF review takes 3 days");
        let old_id = session.id().to_string();

        let new_id = session.reset().to_string();

        assert_ne!(new_id, old_id);
        assert_eq!(session.id(), new_id);
        assert!(session.responses().is_empty());
        assert_eq!(session.response("Q1"), "");
        assert_eq!(session.context(), "Loan Onboarding");
    }
}
