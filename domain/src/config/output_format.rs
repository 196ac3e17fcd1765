//! Output format value object

use serde::{Deserialize, Serialize};

/// How a research outcome is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Subtopics, findings per subtopic, and the final report (default)
    #[default]
    Full,
    /// Only the final report
    Report,
    /// JSON output
    Json,
}
