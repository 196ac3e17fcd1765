//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] — the chat-completion model used for every call
//! - [`question::Question`] — a validated research question
//! - [`error::DomainError`] — domain-level errors

pub mod error;
pub mod model;
pub mod question;
pub mod string;
