//! wordsub command-line entry point

use anyhow::Result;
use clap::Parser;
use wordsub_cli::commands::Commands;

/// Replace whole words using a dictionary while preserving everything else
#[derive(Debug, Parser)]
#[command(name = "wordsub", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Suppress log output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    wordsub_cli::init_logging(cli.verbose, cli.quiet);
    log::debug!("Arguments: {:?}", cli);
    cli.command.execute()
}
