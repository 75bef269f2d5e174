//! Configuration module

use crate::error::CliError;
use lexifer_core::text::DEFAULT_WIDTH;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Words generated when neither the command line nor the definition says
pub const DEFAULT_WORD_COUNT: usize = 100;

/// Sentences in a sample paragraph
pub const DEFAULT_SENTENCES: usize = 25;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Fixed RNG seed for reproducible output
    #[serde(default)]
    pub seed: Option<u64>,

    /// Word list defaults
    #[serde(default)]
    pub words: WordsConfig,

    /// Sample text defaults
    #[serde(default)]
    pub text: TextConfig,
}

/// Word list configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WordsConfig {
    /// Number of words to request
    pub count: usize,

    /// Keep generation order instead of sorting
    pub unsorted: bool,

    /// Print one word per line
    pub one_per_line: bool,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_WORD_COUNT,
            unsorted: false,
            one_per_line: false,
        }
    }
}

/// Sample text configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    /// Sentences per paragraph
    pub sentences: usize,

    /// Wrap column
    pub width: usize,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            sentences: DEFAULT_SENTENCES,
            width: DEFAULT_WIDTH,
        }
    }
}

impl CliConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(source: &str) -> Result<Self, CliError> {
        toml::from_str(source).map_err(|e| CliError::ConfigError(e.to_string()))
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml(&source)?;
        log::debug!("Loaded CLI configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, CliError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}
