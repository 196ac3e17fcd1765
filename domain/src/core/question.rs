//! Question value object

use serde::{Deserialize, Serialize};

/// The user's research question (Value Object)
///
/// Created once per pipeline run and never modified. Blank input is
/// rejected here so the pipeline itself never sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question, returning None if blank
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Question {
    type Error = crate::core::error::DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Question::try_new(s).ok_or(crate::core::error::DomainError::EmptyQuestion)
    }
}

impl TryFrom<String> for Question {
    type Error = crate::core::error::DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::try_new(s).ok_or(crate::core::error::DomainError::EmptyQuestion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::try_new("Compare solar vs wind energy").unwrap();
        assert_eq!(q.content(), "Compare solar vs wind energy");
    }

    #[test]
    fn test_try_new_blank() {
        assert!(Question::try_new("").is_none());
        assert!(Question::try_new("  \n\t ").is_none());
    }

    #[test]
    fn test_try_from_str() {
        let q: Question = "Should I buy Tesla stock?".try_into().unwrap();
        assert_eq!(q.to_string(), "Should I buy Tesla stock?");

        let err = Question::try_from("   ").unwrap_err();
        assert_eq!(err.to_string(), "Question cannot be empty");
    }

    #[test]
    fn test_into_content_keeps_original_text() {
        let q = Question::try_new("  padded  ").unwrap();
        assert_eq!(q.into_content(), "  padded  ");
    }
}
