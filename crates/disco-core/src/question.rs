//! The ordered list of discovery questions.

use crate::error::{DiscoError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Questions asked when no override is configured.
pub const DEFAULT_QUESTIONS: [&str; 5] = [
    "What problem are you trying to solve?",
    "Who is affected by this problem?",
    "How is this handled today?",
    "What are the main challenges with the current process?",
    "What does success look like?",
];

/// An immutable, ordered, non-empty set of question texts.
///
/// Question text doubles as the key for stored responses, so entries must be
/// unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct QuestionSet(Vec<String>);

impl QuestionSet {
    pub fn new(questions: Vec<String>) -> Result<Self> {
        if questions.is_empty() {
            return Err(DiscoError::config("question list must not be empty"));
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if question.trim().is_empty() {
                return Err(DiscoError::config("question text must not be blank"));
            }
            if !seen.insert(question.as_str()) {
                return Err(DiscoError::config(format!(
                    "duplicate question: '{question}'"
                )));
            }
        }

        Ok(Self(questions))
    }

    /// Returns the question at a zero-based position.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Returns the zero-based position of a question.
    pub fn position(&self, question: &str) -> Option<usize> {
        self.0.iter().position(|q| q == question)
    }

    pub fn contains(&self, question: &str) -> bool {
        self.position(question).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for QuestionSet {
    fn default() -> Self {
        Self(DEFAULT_QUESTIONS.iter().map(|q| q.to_string()).collect())
    }
}

impl TryFrom<Vec<String>> for QuestionSet {
    type Error = DiscoError;

    fn try_from(questions: Vec<String>) -> Result<Self> {
        Self::new(questions)
    }
}

impl From<QuestionSet> for Vec<String> {
    fn from(set: QuestionSet) -> Self {
        set.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order() {
        let set = QuestionSet::default();
        assert_eq!(set.len(), 5);
        assert_eq!(set.get(0), Some("What problem are you trying to solve?"));
        assert_eq!(set.get(4), Some("What does success look like?"));
        assert_eq!(set.get(5), None);
    }

    #[test]
    fn test_position_and_contains() {
        let set = QuestionSet::default();
        assert_eq!(set.position("How is this handled today?"), Some(2));
        assert!(!set.contains("What is your budget?"));
    }

    #[test]
    fn test_rejects_empty_list() {
        let err = QuestionSet::new(vec![]).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_rejects_blank_and_duplicate_questions() {
        assert!(QuestionSet::new(vec!["  ".to_string()]).is_err());
        assert!(
            QuestionSet::new(vec!["Why?".to_string(), "Why?".to_string()]).is_err()
        );
    }

    #[test]
    fn test_custom_set_from_toml_array() {
        #[derive(Deserialize)]
        struct Wrapper {
            questions: QuestionSet,
        }

        let parsed: Wrapper = toml::from_str(r#"questions = ["Who pays?", "Who uses it?"]"#)
            .expect("valid question list");
        assert_eq!(parsed.questions.len(), 2);
        assert_eq!(parsed.questions.get(1), Some("Who uses it?"));

        let invalid = toml::from_str::<Wrapper>("questions = []");
        assert!(invalid.is_err());
    }
}
