//! Discovery Session Controller.
//!
//! Owns the process-wide collaborators (question set, prompt template,
//! generator, store). Per-session state is always passed in explicitly.

use disco_core::analysis::AnalysisRow;
use disco_core::error::{SubmitError, ValidationError};
use disco_core::generation::AnalysisGenerator;
use disco_core::prompt::PromptTemplate;
use disco_core::question::QuestionSet;
use disco_core::session::DiscoverySession;
use disco_core::store::AnalysisStore;
use std::sync::Arc;

/// Checks the submission preconditions in order: context first, then response.
pub fn validate_submission(context: &str, response: &str) -> Result<(), ValidationError> {
    if context.trim().is_empty() {
        return Err(ValidationError::MissingContext);
    }
    if response.trim().is_empty() {
        return Err(ValidationError::EmptyResponse);
    }
    Ok(())
}

pub struct DiscoveryController {
    questions: QuestionSet,
    prompt: PromptTemplate,
    generator: Arc<dyn AnalysisGenerator>,
    store: Arc<dyn AnalysisStore>,
}

impl DiscoveryController {
    pub fn new(
        questions: QuestionSet,
        prompt: PromptTemplate,
        generator: Arc<dyn AnalysisGenerator>,
        store: Arc<dyn AnalysisStore>,
    ) -> Self {
        Self {
            questions,
            prompt,
            generator,
            store,
        }
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    /// Submits the session's current answer for `question`.
    ///
    /// Nothing leaves the process unless validation passes. The generator is
    /// called first; the store only runs when it succeeds. On success the
    /// appended row is returned. Resubmitting appends another row.
    pub async fn submit(
        &self,
        session: &DiscoverySession,
        question: &str,
    ) -> Result<AnalysisRow, SubmitError> {
        if !self.questions.contains(question) {
            return Err(SubmitError::UnknownQuestion(question.to_string()));
        }

        let context = session.context();
        let response = session.response(question);
        validate_submission(context, response)?;

        let prompt = self
            .prompt
            .render(response)
            .map_err(|e| SubmitError::Prompt(e.to_string()))?;

        tracing::info!(session_id = %session.id(), question, "Generating analysis");
        let analysis = self.generator.generate(&prompt).await.map_err(|e| {
            tracing::warn!(session_id = %session.id(), error = %e, "Generation failed");
            SubmitError::Generation(e)
        })?;

        let row = AnalysisRow {
            session_id: session.id().to_string(),
            context: context.to_string(),
            question: question.to_string(),
            response: response.to_string(),
            analysis,
        };

        if let Err(source) = self.store.append_row(&row).await {
            tracing::warn!(
                session_id = %session.id(),
                error = %source,
                "Append failed after analysis was generated"
            );
            return Err(SubmitError::Append {
                analysis: row.analysis,
                source,
            });
        }

        tracing::info!(session_id = %session.id(), question, "Saved analysis row");
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_order() {
        assert_eq!(
            validate_submission("", ""),
            Err(ValidationError::MissingContext)
        );
        assert_eq!(
            validate_submission("   \n", "anything"),
            Err(ValidationError::MissingContext)
        );
        assert_eq!(
            validate_submission("Loan Onboarding", " \t"),
            Err(ValidationError::EmptyResponse)
        );
        assert_eq!(validate_submission("Loan Onboarding", "slow"), Ok(()));
    }
}
