//! Prompt domain
//!
//! Templates for the prompt sent at each stage of the research pipeline.

mod template;

pub use template::PromptTemplate;
