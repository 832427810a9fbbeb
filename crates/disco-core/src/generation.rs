//! Text-generation service seam.

use crate::error::GenerationError;

/// Turns a rendered prompt into free-text analysis.
///
/// Implementations return the provider's text verbatim; no structure is
/// imposed on it.
#[async_trait::async_trait]
pub trait AnalysisGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
