//! Tabular store seam.

use crate::analysis::AnalysisRow;
use crate::error::StoreError;

/// Append-only row sink.
///
/// Rows are never read back, updated or deleted through this trait.
#[async_trait::async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Appends exactly one row with the cells of [`AnalysisRow::values`].
    async fn append_row(&self, row: &AnalysisRow) -> Result<(), StoreError>;
}
