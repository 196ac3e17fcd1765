//! Research value objects - the immutable result of a pipeline run.

use super::entities::{Findings, Subtopics};
use serde::{Deserialize, Serialize};

/// Complete result of one research run
///
/// This is what the display surface receives: the subtopics, one finding per
/// subtopic, and the synthesized report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchOutcome {
    /// The original question
    pub question: String,
    /// Subtopics in splitter order
    pub subtopics: Subtopics,
    /// Findings from the last research pass, aligned with `subtopics`
    pub findings: Findings,
    /// Final synthesized report
    pub report: String,
    /// Number of research passes performed (1 to 1 + extra pass cap)
    pub research_passes: usize,
}

impl ResearchOutcome {
    pub fn new(
        question: impl Into<String>,
        subtopics: Subtopics,
        findings: Findings,
        report: impl Into<String>,
        research_passes: usize,
    ) -> Self {
        Self {
            question: question.into(),
            subtopics,
            findings,
            report: report.into(),
            research_passes,
        }
    }

    /// Split into the `(subtopics, findings, report)` triple
    pub fn into_parts(self) -> (Subtopics, Findings, String) {
        (self.subtopics, self.findings, self.report)
    }
}
