//! `[output]` section: how a research outcome is printed

use scholar_domain::OutputFormat;
use serde::{Deserialize, Serialize};

pub use scholar_domain::OutputFormat as FileOutputFormat;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// `full`, `report` or `json`; `--output` wins over this
    pub format: Option<OutputFormat>,
    /// Colored terminal output (`--no-color` turns it off)
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}
