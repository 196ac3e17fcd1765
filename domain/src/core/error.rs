//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("Findings count {findings} does not match subtopic count {subtopics}")]
    MisalignedFindings { subtopics: usize, findings: usize },
}
