//! Interactive research session
//!
//! A reedline loop that runs the full pipeline for each question entered.

mod session;

pub use session::{InteractiveSession, SessionInput};
