//! CLI command implementations

use crate::config::CliConfig;
use crate::error::CliError;
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use lexifer_core::Definition;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub mod check;
pub mod features;
pub mod text;
pub mod words;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a word list from a definition file
    Words(words::WordsArgs),

    /// Generate a paragraph of sample text
    Text(text::TextArgs),

    /// Validate a definition file
    Check(check::CheckArgs),

    /// List the standard phoneme feature table
    Features(features::FeaturesArgs),
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self, global: &GlobalArgs) -> Result<()> {
        global.init_logging()?;
        let config = CliConfig::load_or_default(global.config.as_deref())?;
        log::debug!("Command: {:?}", self);

        match self {
            Commands::Words(args) => args.execute(&config),
            Commands::Text(args) => args.execute(&config),
            Commands::Check(args) => args.execute(),
            Commands::Features(args) => args.execute(),
        }
    }
}

/// Options shared by every command
#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress warnings and log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// CLI configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

impl GlobalArgs {
    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // Tests may run several commands in one process
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }

        Ok(())
    }
}

/// RNG seeded from `seed`, or from OS entropy without one
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => {
            log::debug!("Using seed {seed}");
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Load a definition file, drawing weight jitter from `rng`
pub fn load_definition(path: &Path, rng: &mut ChaCha8Rng) -> Result<Definition> {
    if !path.is_file() {
        return Err(CliError::DefinitionNotFound(path.display().to_string()).into());
    }
    let definition = Definition::from_file_with(path, rng)
        .with_context(|| format!("Failed to load definition {}", path.display()))?;
    log::info!(
        "Loaded {}: {} classes, {} rules, {} filters",
        path.display(),
        definition.system.class_names().len(),
        definition.system.rules().len(),
        definition.system.filters().len()
    );
    Ok(definition)
}

/// Buffered writer for `path`, or stdout
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write + Send + Sync>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}
