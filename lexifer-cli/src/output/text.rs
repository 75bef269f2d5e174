//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use lexifer_core::text::{wrap, DEFAULT_WIDTH};
use std::io::Write;

/// Plain text formatter - wrapped blocks or one word per line
pub struct TextFormatter<W: Write> {
    writer: W,
    one_per_line: bool,
    width: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            one_per_line: false,
            width: DEFAULT_WIDTH,
        }
    }

    /// Print word lists one word per line
    pub fn one_per_line(mut self, enabled: bool) -> Self {
        self.one_per_line = enabled;
        self
    }

    /// Set the wrap column
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_words(&mut self, words: &[String], _requested: usize) -> Result<()> {
        if self.one_per_line {
            for word in words {
                writeln!(self.writer, "{word}")?;
            }
        } else if !words.is_empty() {
            writeln!(self.writer, "{}", wrap(&words.join(" "), self.width))?;
        }
        Ok(())
    }

    fn format_paragraph(&mut self, paragraph: &str) -> Result<()> {
        writeln!(self.writer, "{}", wrap(paragraph, self.width))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
