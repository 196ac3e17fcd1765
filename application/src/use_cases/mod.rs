//! Use cases (application services)
//!
//! Use cases orchestrate domain logic and coordinate with external services
//! through ports.

pub mod run_research;
