//! Layered error types
//!
//! Configuration problems are caught once, when a sound system is built.
//! Generation can only fail on an out-of-alphabet word or on a runaway
//! `!` resampling loop.

use std::path::PathBuf;
use thiserror::Error;

/// Misplaced `!` control suffix in a word-shape rule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// `!` follows a token that is not preceded by the same token
    #[error("misplaced '!' option: in non-duplicate environment: {rule}")]
    NotDuplicate {
        /// The offending rule text
        rule: String,
    },

    /// `!` follows a literal rather than a phoneme class
    #[error("use of '!' here makes no sense: {rule}")]
    NotAClass {
        /// The offending rule text
        rule: String,
    },
}

/// Errors raised while assembling a sound system
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Weight that is zero, negative or not finite
    #[error("invalid weight {weight} for '{key}': weights must be positive")]
    InvalidWeight {
        /// Key the weight was attached to
        key: String,
        /// The rejected weight
        weight: f64,
    },

    /// Individually valid weights whose sum is not finite
    #[error("weights sum past the largest representable total")]
    WeightOverflow,

    /// Weighted selection over nothing
    #[error("'{0}' has no members to select from")]
    Empty(String),

    /// Sound system without any word-shape rule
    #[error("no word-shape rules defined")]
    NoRules,

    /// Class names are single characters other than the control suffixes
    #[error("invalid phoneme class name '{0}': must be a single character other than '?' or '!'")]
    InvalidClassName(String),

    /// Random rate outside 0..=100
    #[error("random rate {0} out of range (0-100)")]
    InvalidRandomRate(u32),

    /// Filter pattern that does not compile
    #[error("invalid filter pattern '{pattern}': {source}")]
    InvalidFilter {
        /// The pattern as written
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// Empty entry in a letter order
    #[error("empty grapheme in sort order")]
    EmptyGrapheme,

    /// Grapheme listed twice in a letter order
    #[error("grapheme '{0}' appears more than once in sort order")]
    DuplicateGrapheme(String),

    /// Assimilation or metathesis enabled but no feature notation chosen
    #[error("assimilation requires a feature notation (ipa or digraph)")]
    MissingNotation,

    /// Embedded feature table failed to load
    #[error("feature table error: {0}")]
    FeatureTable(String),

    /// Rule syntax error
    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// A generated word contains a character the sort order does not know
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("word with unknown letter: '{word}' (a filter or assimilation might have caused this)")]
pub struct UnknownGraphemeError {
    /// The word that could not be tokenized
    pub word: String,
}

/// Errors that abort word generation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// Out-of-alphabet word
    #[error(transparent)]
    UnknownGrapheme(#[from] UnknownGraphemeError),

    /// `!` could not find a differing phoneme
    #[error("rule '{rule}' could not avoid a repeated phoneme after {attempts} draws")]
    RepeatLimit {
        /// The rule being expanded
        rule: String,
        /// Number of draws made
        attempts: usize,
    },
}

/// Errors raised while loading a definition file
#[derive(Error, Debug)]
pub enum DefinitionError {
    /// The file could not be read
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        /// Path of the definition file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Unrecognised `with:` option
    #[error("line {line}: unknown option '{option}'")]
    UnknownOption {
        /// 1-based line number
        line: usize,
        /// The option as written
        option: String,
    },

    /// Line that matches no directive or is malformed
    #[error("line {line}: cannot parse '{text}'")]
    Parse {
        /// 1-based line number
        line: usize,
        /// The offending line
        text: String,
    },

    /// Class member without a usable `:weight`
    #[error("line {line}: '{item}' is not a valid phoneme and weight")]
    Weight {
        /// 1-based line number
        line: usize,
        /// The offending member
        item: String,
    },

    /// Cluster field row of the wrong width
    #[error("line {line}: cluster field row has {found} entries, expected {expected}")]
    ClusterRow {
        /// 1-based line number
        line: usize,
        /// Number of columns in the header
        expected: usize,
        /// Number of entries in the row
        found: usize,
    },

    /// The assembled sound system is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for configuration
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type for generation
pub type Result<T> = std::result::Result<T, GenerateError>;
