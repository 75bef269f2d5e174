//! Words command implementation

use super::{load_definition, open_output, seeded_rng};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::{JsonFormatter, OutputFormatter, TextFormatter};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the words command
#[derive(Debug, Args)]
pub struct WordsArgs {
    /// Definition file
    #[arg(short, long, value_name = "FILE", required = true)]
    pub definition: PathBuf,

    /// Number of words to generate
    #[arg(short = 'n', long, value_name = "N")]
    pub count: Option<usize>,

    /// Keep generation order instead of sorting
    #[arg(short, long)]
    pub unsorted: bool,

    /// Print one word per line
    #[arg(long)]
    pub one_per_line: bool,

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

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Wrapped block or one word per line
    Text,
    /// JSON document with counts
    Json,
}

impl WordsArgs {
    /// Execute the words command
    pub fn execute(&self, config: &CliConfig) -> Result<()> {
        let mut rng = seeded_rng(self.seed.or(config.seed));
        let definition = load_definition(&self.definition, &mut rng)?;

        let count = self
            .count
            .or(definition.word_count)
            .unwrap_or(config.words.count);
        let unsorted = self.unsorted || config.words.unsorted;
        let one_per_line = self.one_per_line || config.words.one_per_line;

        let words = definition
            .system
            .generate_with(count, unsorted, &mut rng)
            .map_err(CliError::from)?;
        if words.len() < count {
            log::info!("Only {} of {} words could be generated", words.len(), count);
        }

        let writer = open_output(self.output.as_deref())?;
        let mut formatter: Box<dyn OutputFormatter> = match self.format {
            OutputFormat::Text => Box::new(
                TextFormatter::new(writer)
                    .one_per_line(one_per_line)
                    .width(config.text.width),
            ),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        };
        formatter.format_words(&words, count)?;
        formatter.finish()
    }
}
