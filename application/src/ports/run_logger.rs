//! Port for structured run transcripts.
//!
//! Defines the [`RunLogger`] trait for recording pipeline events (subtopics,
//! research passes, judge verdicts, the final report) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures the full transcript
//! of a run in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured pipeline event for logging.
pub struct RunEvent {
    /// Event type identifier (e.g., "subtopics", "research_pass", "report").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl RunEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging run events.
///
/// `log` is synchronous and infallible; a failing transcript never
/// interrupts a run.
pub trait RunLogger: Send + Sync {
    /// Record a run event.
    fn log(&self, event: RunEvent);
}

/// No-op implementation for tests and when transcripts are disabled.
pub struct NoRunLogger;

impl RunLogger for NoRunLogger {
    fn log(&self, _event: RunEvent) {}
}
