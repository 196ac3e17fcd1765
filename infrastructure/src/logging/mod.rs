//! Structured run transcripts.
//!
//! Provides [`JsonlRunLogger`], a JSONL file writer that implements the
//! [`RunLogger`](scholar_application::RunLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlRunLogger;
