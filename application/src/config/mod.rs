//! Application-level configuration.
//!
//! - [`PipelineParams`] — research loop bound, per-call timeout and retry policy

pub mod pipeline_params;

pub use pipeline_params::{DEFAULT_MAX_EXTRA_PASSES, PipelineParams};
