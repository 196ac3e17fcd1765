//! Output formatting for research outcomes

pub mod console;
pub mod formatter;
