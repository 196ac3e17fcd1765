//! Response parsing for the research pipeline.
//!
//! Pure domain logic: no I/O, just turning raw completion text into
//! structured values. Model output is only ever *parsed* as data.
//!
//! | Function | Stage | Accepts |
//! |----------|-------|---------|
//! | [`parse_subtopics`] | Splitting | JSON array of exactly 3 strings |
//! | [`JudgeVerdict::parse`] | Judging | `yes` / `no` |

use super::entities::{SUBTOPIC_COUNT, Subtopics};
use thiserror::Error;

/// Upper bound on the raw splitter response accepted for parsing
pub const MAX_SPLIT_RESPONSE_BYTES: usize = 8 * 1024;

/// Upper bound on a single subtopic string
pub const MAX_SUBTOPIC_CHARS: usize = 512;

/// Reasons a splitter response is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitParseError {
    #[error("response is {len} bytes (max {max})")]
    ResponseTooLarge { len: usize, max: usize },

    #[error("response is not a JSON array of strings: {0}")]
    NotAStringList(String),

    #[error("expected {expected} subtopics, found {found}")]
    WrongCount { expected: usize, found: usize },

    #[error("subtopic {index} is empty")]
    EmptySubtopic { index: usize },

    #[error("subtopic {index} exceeds {max} characters")]
    SubtopicTooLong { index: usize, max: usize },
}

/// Parse the splitter's completion into exactly [`SUBTOPIC_COUNT`] subtopics.
///
/// The response must be a JSON array of strings, optionally wrapped in one
/// markdown code fence. Each entry is trimmed.
///
/// # Examples
///
/// ```
/// use scholar_domain::research::parsing::{parse_subtopics, SplitParseError};
///
/// let subtopics = parse_subtopics(r#"["Solar cost trends", "Wind cost trends", "Environmental impact"]"#).unwrap();
/// assert_eq!(subtopics.get(1), Some("Wind cost trends"));
///
/// assert!(matches!(parse_subtopics("not a list"), Err(SplitParseError::NotAStringList(_))));
/// ```
pub fn parse_subtopics(response: &str) -> Result<Subtopics, SplitParseError> {
    if response.len() > MAX_SPLIT_RESPONSE_BYTES {
        return Err(SplitParseError::ResponseTooLarge {
            len: response.len(),
            max: MAX_SPLIT_RESPONSE_BYTES,
        });
    }

    let body = strip_code_fence(response.trim());
    let items: Vec<String> = serde_json::from_str(body)
        .map_err(|e| SplitParseError::NotAStringList(e.to_string()))?;

    if items.len() != SUBTOPIC_COUNT {
        return Err(SplitParseError::WrongCount {
            expected: SUBTOPIC_COUNT,
            found: items.len(),
        });
    }

    let mut subtopics = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let item = item.trim();
        if item.is_empty() {
            return Err(SplitParseError::EmptySubtopic { index });
        }
        if item.chars().count() > MAX_SUBTOPIC_CHARS {
            return Err(SplitParseError::SubtopicTooLong {
                index,
                max: MAX_SUBTOPIC_CHARS,
            });
        }
        subtopics.push(item.to_string());
    }

    Ok(Subtopics::new(subtopics))
}

/// Remove a single surrounding ```` ``` ```` / ```` ```json ```` fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    let inner = inner.trim_start();
    if inner.starts_with('[') {
        return inner.trim_end();
    }
    // Drop the info string ("json"), which may share a line with the array
    let tag_end = inner
        .find(|c: char| c.is_whitespace() || c == '[')
        .unwrap_or(inner.len());
    inner[tag_end..].trim()
}

/// Sufficiency judge verdict
///
/// Only an exact `yes` asks for more research. Everything else ends the
/// loop, so a misbehaving judge can never keep the pipeline spinning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JudgeVerdict {
    /// Judge answered `yes`
    NeedsMoreResearch,
    /// Judge answered `no`
    Sufficient,
    /// Judge answered something else; treated as sufficient
    Malformed(String),
}

impl JudgeVerdict {
    /// Classify a judge completion (trimmed, case-insensitive)
    pub fn parse(response: &str) -> Self {
        let normalized = response.trim().to_lowercase();
        match normalized.as_str() {
            "yes" => JudgeVerdict::NeedsMoreResearch,
            "no" => JudgeVerdict::Sufficient,
            _ => JudgeVerdict::Malformed(response.trim().to_string()),
        }
    }

    pub fn needs_more_research(&self) -> bool {
        matches!(self, JudgeVerdict::NeedsMoreResearch)
    }
}
