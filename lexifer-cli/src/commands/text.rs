//! Text command implementation

use super::words::OutputFormat;
use super::{load_definition, open_output, seeded_rng};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::{JsonFormatter, OutputFormatter, TextFormatter};
use anyhow::Result;
use clap::Args;
use lexifer_core::text::compose_paragraph;
use std::path::PathBuf;

/// Arguments for the text command
#[derive(Debug, Args)]
pub struct TextArgs {
    /// Definition file
    #[arg(short, long, value_name = "FILE", required = true)]
    pub definition: PathBuf,

    /// Number of sentences
    #[arg(long, value_name = "N")]
    pub sentences: Option<usize>,

    /// Wrap column
    #[arg(long, value_name = "COLUMNS")]
    pub width: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Seed for reproducible output
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl TextArgs {
    /// Execute the text command
    pub fn execute(&self, config: &CliConfig) -> Result<()> {
        let mut rng = seeded_rng(self.seed.or(config.seed));
        let definition = load_definition(&self.definition, &mut rng)?;

        let sentences = self.sentences.unwrap_or(config.text.sentences);
        let width = self.width.unwrap_or(config.text.width);
        let paragraph =
            compose_paragraph(&definition.system, sentences, &mut rng).map_err(CliError::from)?;

        let writer = open_output(self.output.as_deref())?;
        let mut formatter: Box<dyn OutputFormatter> = match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer).width(width)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        };
        formatter.format_paragraph(&paragraph)?;
        formatter.finish()
    }
}
