//! OpenAI-compatible provider adapter
//!
//! - [`adapter::OpenAiCompletionProvider`] — `CompletionProvider` over HTTP (reqwest)
//! - [`types`] — request/response wire types and error mapping

pub mod adapter;
pub mod types;

pub use adapter::{OpenAiCompletionProvider, OpenAiSettings};
