//! User-facing status line for a submission.

use disco_core::analysis::AnalysisRow;
use disco_core::error::{SubmitError, ValidationError};

pub const SAVED_MESSAGE: &str = "Saved to Google Sheets with AI analysis!";
pub const MISSING_CONTEXT_MESSAGE: &str = "Please enter Discovery Context first.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "Response cannot be empty.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    /// Rejected locally; nothing was sent anywhere.
    Invalid,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
    /// Analysis that was generated but could not be saved.
    pub unsaved_analysis: Option<String>,
}

impl StatusMessage {
    pub fn from_outcome(outcome: &Result<AnalysisRow, SubmitError>) -> Self {
        match outcome {
            Ok(_) => Self {
                level: StatusLevel::Success,
                text: SAVED_MESSAGE.to_string(),
                unsaved_analysis: None,
            },
            Err(SubmitError::Validation(validation)) => Self {
                level: StatusLevel::Invalid,
                text: match validation {
                    ValidationError::MissingContext => MISSING_CONTEXT_MESSAGE,
                    ValidationError::EmptyResponse => EMPTY_RESPONSE_MESSAGE,
                }
                .to_string(),
                unsaved_analysis: None,
            },
            Err(err) => Self {
                level: StatusLevel::Error,
                text: format!("Error: {err}"),
                unsaved_analysis: err.unsaved_analysis().map(str::to_string),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use disco_core::error::{GenerationError, StoreError};

    #[test]
    fn test_success() {
        let row = AnalysisRow {
            session_id: "s".to_string(),
            context: "c".to_string(),
            question: "q".to_string(),
            response: "r".to_string(),
            analysis: "a".to_string(),
        };
        let status = StatusMessage::from_outcome(&Ok(row));
        assert_eq!(status.level, StatusLevel::Success);
        assert_eq!(status.text, SAVED_MESSAGE);
    }

    #[test]
    fn test_validation_messages() {
        let missing = StatusMessage::from_outcome(&Err(ValidationError::MissingContext.into()));
        assert_eq!(missing.level, StatusLevel::Invalid);
        assert_eq!(missing.text, MISSING_CONTEXT_MESSAGE);

        let empty = StatusMessage::from_outcome(&Err(ValidationError::EmptyResponse.into()));
        assert_eq!(empty.text, EMPTY_RESPONSE_MESSAGE);
    }

    #[test]
    fn test_generation_error_shows_cause() {
        let status = StatusMessage::from_outcome(&Err(SubmitError::Generation(
            GenerationError::Http {
                status: 429,
                message: "Rate limit reached".to_string(),
            },
        )));
        assert_eq!(status.level, StatusLevel::Error);
        assert!(status.text.starts_with("Error: "));
        assert!(status.text.contains("Rate limit reached"));
        assert!(status.unsaved_analysis.is_none());
    }

    #[test]
    fn test_append_error_keeps_analysis() {
        let status = StatusMessage::from_outcome(&Err(SubmitError::Append {
            analysis: "1) Core challenge".to_string(),
            source: StoreError::WorkbookNotFound("BA_Discovery_Data".to_string()),
        }));
        assert!(status.text.contains("BA_Discovery_Data"));
        assert_eq!(status.unsaved_analysis.as_deref(), Some("1) Core challenge"));
    }
}
