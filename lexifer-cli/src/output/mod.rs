//! Output formatting module

use anyhow::Result;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format a generated word list; `requested` is the count asked for
    fn format_words(&mut self, words: &[String], requested: usize) -> Result<()>;

    /// Format a sample paragraph
    fn format_paragraph(&mut self, paragraph: &str) -> Result<()>;

    /// Finalize output (e.g., close JSON document)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;
