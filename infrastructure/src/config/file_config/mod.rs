//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod logging;
mod output;
mod pipeline;
mod provider;

pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use pipeline::FilePipelineConfig;
pub use provider::{DEFAULT_BASE_URL, FileProviderConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound accepted for `pipeline.max_extra_passes`
pub const MAX_EXTRA_PASSES_LIMIT: usize = 10;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("max_extra_passes cannot exceed {max} (got {value})")]
    TooManyExtraPasses { value: usize, max: usize },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Completion provider settings
    pub provider: FileProviderConfig,
    /// Research loop settings
    pub pipeline: FilePipelineConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(0) = self.pipeline.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.provider.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        if self.provider.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }

        if self.pipeline.max_extra_passes > MAX_EXTRA_PASSES_LIMIT {
            return Err(ConfigValidationError::TooManyExtraPasses {
                value: self.pipeline.max_extra_passes,
                max: MAX_EXTRA_PASSES_LIMIT,
            });
        }

        Ok(())
    }
}
