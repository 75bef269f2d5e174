//! Features command implementation

use super::words::OutputFormat;
use anyhow::Result;
use clap::Args;
use lexifer_core::{FeatureTable, Notation};

/// Arguments for the features command
#[derive(Debug, Args)]
pub struct FeaturesArgs {
    /// Spelling of the listed phonemes
    #[arg(long, value_enum, default_value = "ipa")]
    pub notation: NotationArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Feature table notations
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum NotationArg {
    /// IPA symbols
    Ipa,
    /// ASCII digraphs
    Digraph,
}

impl From<NotationArg> for Notation {
    fn from(arg: NotationArg) -> Self {
        match arg {
            NotationArg::Ipa => Notation::Ipa,
            NotationArg::Digraph => Notation::Digraph,
        }
    }
}

impl FeaturesArgs {
    /// Execute the features command
    pub fn execute(&self) -> Result<()> {
        let table = FeatureTable::standard(self.notation.into())?;
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(table.entries())?);
            }
            OutputFormat::Text => {
                println!("Standard feature table ({} notation):", table.notation());
                for entry in table.entries() {
                    println!(
                        "  {:<5} {:<10} {:<13} {}",
                        entry.symbol, entry.voicing, entry.place, entry.manner
                    );
                }
            }
        }
        Ok(())
    }
}
