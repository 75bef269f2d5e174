//! Check command implementation

use super::{load_definition, seeded_rng};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the check command
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Definition file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub definition: PathBuf,
}

impl CheckArgs {
    /// Execute the check command
    pub fn execute(&self) -> Result<()> {
        println!("Checking definition: {}", self.definition.display());

        let definition = match load_definition(&self.definition, &mut seeded_rng(Some(0))) {
            Ok(definition) => definition,
            Err(e) => {
                println!("✗ Definition is invalid!");
                println!("  Error: {e:#}");
                return Err(e.context("Validation failed"));
            }
        };

        let system = &definition.system;
        println!("✓ Definition is valid!");
        println!(
            "  Classes: {}",
            system
                .class_names()
                .iter()
                .map(char::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        );
        println!("  Rules: {}", system.rules().len());
        println!("  Filters: {}", system.filters().len());
        println!("  Random rate: {}%", system.random_rate());
        if let Some(collation) = system.collation() {
            println!("  Letters: {}", collation.graphemes().len());
        }
        if let Some(assimilator) = system.assimilator() {
            println!("  Sound changes: {} notation", assimilator.table().notation());
        }
        for warning in &definition.warnings {
            println!("  Warning: {warning}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn check(source: &str) -> Result<()> {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{source}").unwrap();
        CheckArgs {
            definition: file.path().to_path_buf(),
        }
        .execute()
    }

    #[test]
    fn test_check_args_debug() {
        let args = CheckArgs {
            definition: PathBuf::from("lang.def"),
        };
        let debug_str = format!("{:?}", args);
        assert!(debug_str.contains("CheckArgs"));
        assert!(debug_str.contains("lang.def"));
    }

    #[test]
    fn test_check_valid_definition() {
        assert!(check("letters: a p t\nC = p t\nV = a\nwords: CV\n").is_ok());
    }

    #[test]
    fn test_check_invalid_definition() {
        assert!(check("C = p t\n").is_err());
        assert!(check("C = p:x\nwords: C\n").is_err());
    }
}
