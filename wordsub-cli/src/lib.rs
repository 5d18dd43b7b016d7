//! wordsub CLI library
//!
//! This library provides the command-line interface for the wordsub
//! dictionary substitution filter.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use error::{CliError, CliResult};

/// Initialize logging based on verbosity level
///
/// Nothing is logged when `quiet` is set.
pub fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // A second initialization (e.g. in tests) is harmless
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}
