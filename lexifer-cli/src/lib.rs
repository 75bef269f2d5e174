//! Lexifer CLI library
//!
//! Command-line front end for the lexifer word generator: word lists,
//! sample text, definition checks and the standard feature table.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use error::{CliError, CliResult};
