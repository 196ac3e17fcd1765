//! Research pipeline entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Number of subtopics a question is split into
pub const SUBTOPIC_COUNT: usize = 3;

/// Stage of a research run
///
/// ```text
/// Splitting → Researching → Judging ⇄ Researching (bounded) → Synthesizing → Done
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Question is decomposed into subtopics
    Splitting,
    /// Every subtopic is researched concurrently
    Researching,
    /// Findings are checked for sufficiency
    Judging,
    /// Findings are combined into the final report
    Synthesizing,
    /// Run finished
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Splitting => "splitting",
            Stage::Researching => "researching",
            Stage::Judging => "judging",
            Stage::Synthesizing => "synthesizing",
            Stage::Done => "done",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Splitting => "Topic Splitting",
            Stage::Researching => "Research",
            Stage::Judging => "Sufficiency Check",
            Stage::Synthesizing => "Synthesis",
            Stage::Done => "Done",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Ordered subtopics produced once per run by the splitter
///
/// Order drives findings alignment and never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subtopics(Vec<String>);

impl Subtopics {
    pub(crate) fn new(items: Vec<String>) -> Self {
        Self(items)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Subtopics {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One summary per subtopic, positionally aligned with [`Subtopics`]
///
/// A research pass replaces the whole value; findings are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Findings(Vec<String>);

impl Findings {
    /// Build findings for `subtopics`, rejecting a length mismatch.
    pub fn aligned(subtopics: &Subtopics, summaries: Vec<String>) -> Result<Self, DomainError> {
        if summaries.len() != subtopics.len() {
            return Err(DomainError::MisalignedFindings {
                subtopics: subtopics.len(),
                findings: summaries.len(),
            });
        }
        Ok(Self(summaries))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Pair each finding with the subtopic it was researched for
    pub fn with_subtopics<'a>(
        &'a self,
        subtopics: &'a Subtopics,
    ) -> impl Iterator<Item = (&'a str, &'a str)> {
        subtopics.iter().zip(self.iter())
    }
}
