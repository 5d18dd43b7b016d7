//! CLI command implementations

use crate::error::CliResult;
use clap::Subcommand;
use wordsub_core::Locale;

pub mod filter;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Filter text, replacing dictionary words
    Filter(filter::FilterArgs),

    /// Check that a dictionary file loads
    Validate(validate::ValidateArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List available locales
    Locales,

    /// List available driving modes
    Modes,
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> CliResult<()> {
        match self {
            Commands::Filter(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::List { subcommand } => {
                for line in subcommand.lines() {
                    println!("{line}");
                }
                Ok(())
            }
        }
    }
}

impl ListCommands {
    /// Lines printed by the list command
    pub fn lines(&self) -> Vec<String> {
        match self {
            ListCommands::Locales => Locale::ALL
                .iter()
                .map(|locale| format!("{:<8} {}", locale.as_str(), locale.description()))
                .collect(),
            ListCommands::Modes => filter::Mode::ALL
                .iter()
                .map(|mode| format!("{:<8} {}", mode.as_str(), mode.description()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_locales() {
        let lines = ListCommands::Locales.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("classic"));
        assert!(lines[1].starts_with("latin1"));
    }

    #[test]
    fn test_list_modes() {
        let lines = ListCommands::Modes.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().any(|line| line.starts_with("push")));
    }

    #[test]
    fn test_list_execute() {
        let command = Commands::List {
            subcommand: ListCommands::Modes,
        };
        let result: CliResult<()> = command.execute();
        assert!(result.is_ok());
    }

    #[test]
    fn test_commands_debug_format() {
        let list_cmd = Commands::List {
            subcommand: ListCommands::Locales,
        };
        let debug_str = format!("{:?}", list_cmd);
        assert!(debug_str.contains("List"));
        assert!(debug_str.contains("Locales"));
    }
}
