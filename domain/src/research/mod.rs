//! Research domain
//!
//! Entities, result types and response parsing for the
//! split → research → judge → synthesize pipeline.

pub mod entities;
pub mod parsing;
pub mod value_objects;
