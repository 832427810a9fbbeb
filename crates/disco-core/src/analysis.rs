//! The persisted unit: one analysed stakeholder response.

use serde::{Deserialize, Serialize};

/// Column headers in append order.
pub const ROW_COLUMNS: [&str; 5] = ["session_id", "context", "question", "response", "analysis"];

/// One row of the tabular store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRow {
    pub session_id: String,
    pub context: String,
    pub question: String,
    pub response: String,
    pub analysis: String,
}

impl AnalysisRow {
    /// Cell values in [`ROW_COLUMNS`] order.
    pub fn values(&self) -> [&str; 5] {
        [
            self.session_id.as_str(),
            self.context.as_str(),
            self.question.as_str(),
            self.response.as_str(),
            self.analysis.as_str(),
        ]
    }
}
