//! Domain layer for scholar-pipeline
//!
//! This crate contains the core entities, value objects, response parsing and
//! prompt templates. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! A research run turns one [`Question`] into three [`Subtopics`], researches
//! each of them into [`Findings`] (positionally aligned), optionally repeats
//! the research when the sufficiency judge asks for it, and finally
//! synthesizes a report. The whole run is captured in a [`ResearchOutcome`].

pub mod config;
pub mod core;
pub mod prompt;
pub mod research;

// Re-export commonly used types
pub use config::OutputFormat;
pub use crate::core::{error::DomainError, model::Model, question::Question, string::truncate};
pub use prompt::PromptTemplate;
pub use research::{
    entities::{Findings, SUBTOPIC_COUNT, Stage, Subtopics},
    parsing::{JudgeVerdict, SplitParseError, parse_subtopics},
    value_objects::ResearchOutcome,
};
