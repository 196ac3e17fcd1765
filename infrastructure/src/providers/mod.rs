//! LLM provider adapters implementing the `CompletionProvider` port.

pub mod openai;

pub use openai::{OpenAiCompletionProvider, OpenAiSettings};
