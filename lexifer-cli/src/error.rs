//! Error handling for the CLI application

use std::fmt;

/// Errors specific to the command-line front end
#[derive(Debug)]
pub enum CliError {
    /// Definition file missing or not a regular file
    DefinitionNotFound(String),
    /// CLI configuration file could not be read or parsed
    ConfigError(String),
    /// Word generation failed
    GenerationError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::DefinitionNotFound(path) => write!(f, "Definition file not found: {path}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::GenerationError(msg) => write!(f, "Generation error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<lexifer_core::GenerateError> for CliError {
    fn from(error: lexifer_core::GenerateError) -> Self {
        CliError::GenerationError(error.to_string())
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use lexifer_core::{GenerateError, UnknownGraphemeError};

    #[test]
    fn test_definition_not_found_display() {
        let error = CliError::DefinitionNotFound("lang.def".to_string());
        assert_eq!(error.to_string(), "Definition file not found: lang.def");
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("invalid type".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid type");
    }

    #[test]
    fn test_from_generate_error() {
        let error: CliError = GenerateError::from(UnknownGraphemeError {
            word: "qa".to_string(),
        })
        .into();
        assert!(error.to_string().starts_with("Generation error:"));
        assert!(error.to_string().contains("'qa'"));
    }

    #[test]
    fn test_converts_into_anyhow() {
        let result: CliResult<()> = Err(CliError::ConfigError("bad".to_string()).into());
        let error = result.unwrap_err();
        assert!(error.downcast_ref::<CliError>().is_some());
    }
}
