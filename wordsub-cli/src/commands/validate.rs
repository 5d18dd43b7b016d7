//! Validate command implementation

use crate::error::CliResult;
use clap::Args;
use std::path::PathBuf;
use wordsub_core::DictionaryConfig;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the dictionary file to validate
    #[arg(short = 'd', long, value_name = "FILE", required = true)]
    pub dictionary: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        println!("Validating dictionary: {}", self.dictionary.display());

        match DictionaryConfig::from_file(&self.dictionary) {
            Ok(config) => {
                let name = config.metadata.name.clone();
                let dictionary = config.into_dictionary();
                println!("✓ Dictionary is valid!");
                if let Some(name) = name {
                    println!("  Name: {name}");
                }
                println!("  Entries: {}", dictionary.len());
                println!("  Locale: {}", dictionary.classifier());
                println!("  Longest key: {} bytes", dictionary.max_length());
                Ok(())
            }
            Err(e) => {
                println!("✗ Dictionary is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
