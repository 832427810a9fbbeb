//! Secret management service trait.
//!
//! Defines the interface for loading the generation API key and the
//! tabular-store service account.

use crate::config::{Credentials, SecretConfig};
use crate::error::Result;

/// Service for managing secret configuration.
///
/// # Security Note
///
/// Implementations should ensure that:
/// - Secret files have appropriate permissions (e.g., 600 on Unix)
/// - Secrets are never logged or exposed in error messages
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads whatever secrets are available. Missing entries stay `None`.
    async fn load_secrets(&self) -> Result<SecretConfig>;

    /// Loads secrets and fails unless both credentials are present.
    async fn require_credentials(&self) -> Result<Credentials> {
        self.load_secrets().await?.require()
    }
}
