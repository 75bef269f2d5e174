//! Lexifer command-line entry point

use anyhow::Result;
use clap::Parser;
use lexifer_cli::commands::{Commands, GlobalArgs};

/// Word generator for constructed languages
#[derive(Debug, Parser)]
#[command(name = "lexifer", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.command.execute(&cli.global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["lexifer", "features", "-vv", "--notation", "digraph"]).unwrap();
        assert_eq!(cli.global.verbose, 2);
        assert!(matches!(cli.command, Commands::Features(_)));
    }
}
