//! Pipeline parameters — research loop and provider call control.
//!
//! [`PipelineParams`] groups the static parameters that control
//! [`RunResearchUseCase`](crate::use_cases::run_research::RunResearchUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default cap on judge-gated extra research passes
pub const DEFAULT_MAX_EXTRA_PASSES: usize = 2;

/// Research loop and provider call parameters.
///
/// The defaults reproduce the reference behavior: at most two extra passes,
/// no retry, no timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Maximum number of extra research passes the judge may trigger.
    pub max_extra_passes: usize,
    /// Upper bound on a single provider call. `None` waits forever.
    pub call_timeout: Option<Duration>,
    /// Retries for transient provider errors within one call.
    pub max_retries: u32,
    /// Delay before the first retry; doubled on each further attempt.
    pub retry_backoff: Duration,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            max_extra_passes: DEFAULT_MAX_EXTRA_PASSES,
            call_timeout: None,
            max_retries: 0,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

impl PipelineParams {
    // ==================== Builder Methods ====================

    pub fn with_max_extra_passes(mut self, max: usize) -> Self {
        self.max_extra_passes = max;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Delay before retry number `attempt` (0-based), capped at 30 seconds.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.retry_backoff
            .saturating_mul(factor)
            .min(Duration::from_secs(30))
    }
}
