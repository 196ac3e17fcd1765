//! Pipeline configuration from TOML (`[pipeline]` section)

use scholar_application::{DEFAULT_MAX_EXTRA_PASSES, PipelineParams};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Research loop settings
///
/// # Example
///
/// ```toml
/// [pipeline]
/// max_extra_passes = 2
/// timeout_seconds = 120
/// max_retries = 2
/// retry_backoff_ms = 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    /// Cap on judge-triggered extra research passes
    pub max_extra_passes: usize,
    /// Per-call timeout in seconds; unset waits forever
    pub timeout_seconds: Option<u64>,
    /// Retries for transient provider errors
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_backoff_ms: u64,
}

impl Default for FilePipelineConfig {
    fn default() -> Self {
        Self {
            max_extra_passes: DEFAULT_MAX_EXTRA_PASSES,
            timeout_seconds: None,
            max_retries: 0,
            retry_backoff_ms: 500,
        }
    }
}

impl FilePipelineConfig {
    pub fn to_params(&self) -> PipelineParams {
        PipelineParams::default()
            .with_max_extra_passes(self.max_extra_passes)
            .with_call_timeout(self.timeout_seconds.map(Duration::from_secs))
            .with_max_retries(self.max_retries)
            .with_retry_backoff(Duration::from_millis(self.retry_backoff_ms))
    }
}
