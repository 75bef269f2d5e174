//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - collects output into one document
pub struct JsonFormatter<W: Write> {
    writer: W,
    document: Option<JsonOutput>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum JsonOutput {
    /// A generated word list
    Words {
        /// Words asked for
        requested: usize,
        /// Words actually produced
        delivered: usize,
        /// The words, in output order
        words: Vec<String>,
    },
    /// A sample paragraph
    Paragraph {
        /// Paragraph text, unwrapped
        text: String,
    },
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            document: None,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_words(&mut self, words: &[String], requested: usize) -> Result<()> {
        self.document = Some(JsonOutput::Words {
            requested,
            delivered: words.len(),
            words: words.to_vec(),
        });
        Ok(())
    }

    fn format_paragraph(&mut self, paragraph: &str) -> Result<()> {
        self.document = Some(JsonOutput::Paragraph {
            text: paragraph.to_string(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(document) = &self.document {
            serde_json::to_writer_pretty(&mut self.writer, document)?;
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_list_document() {
        let mut out = Vec::new();
        let mut formatter = JsonFormatter::new(&mut out);
        formatter
            .format_words(&["ka".to_string(), "pi".to_string()], 5)
            .unwrap();
        formatter.finish().unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["requested"], 5);
        assert_eq!(value["delivered"], 2);
        assert_eq!(value["words"][1], "pi");
    }

    #[test]
    fn test_paragraph_round_trip() {
        let mut out = Vec::new();
        let mut formatter = JsonFormatter::new(&mut out);
        formatter.format_paragraph("Ka pi.").unwrap();
        formatter.finish().unwrap();

        let parsed: JsonOutput = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            parsed,
            JsonOutput::Paragraph {
                text: "Ka pi.".to_string()
            }
        );
    }

    #[test]
    fn test_nothing_formatted() {
        let mut out = Vec::new();
        JsonFormatter::new(&mut out).finish().unwrap();
        assert!(out.is_empty());
    }
}
