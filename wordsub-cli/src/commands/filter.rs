//! Filter command implementation

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::input::open_input;
use crate::output::{open_output, StatsReport};
use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::io::{self, ErrorKind, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use wordsub_core::{
    BlockingFilter, Dictionary, DictionaryConfig, FilterReader, FilterStats, FilterWriter, Locale,
    ReadSource,
};

/// Arguments for the filter command
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Dictionary file (`.toml`, or a word list otherwise)
    #[arg(short, long, value_name = "FILE")]
    pub dictionary: Option<PathBuf>,

    /// Extra entry, may be repeated; overrides the dictionary file
    #[arg(short, long = "entry", value_name = "KEY=VALUE", value_parser = parse_entry)]
    pub entries: Vec<(String, String)>,

    /// Input file (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Driving mode
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// I/O block size for the pull and push modes
    #[arg(long, value_name = "BYTES")]
    pub chunk_size: Option<usize>,

    /// Locale used to classify bytes
    #[arg(short, long)]
    pub locale: Option<Locale>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print statistics as JSON to stderr
    #[arg(long)]
    pub stats: bool,
}

/// How the filter is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Read everything, write everything
    Blocking,
    /// Pull filtered bytes out of the input
    Pull,
    /// Push input bytes into the output
    Push,
}

impl Mode {
    /// Every mode, in listing order
    pub const ALL: [Mode; 3] = [Mode::Blocking, Mode::Pull, Mode::Push];

    /// Name accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Blocking => "blocking",
            Mode::Pull => "pull",
            Mode::Push => "push",
        }
    }

    /// One-line description
    pub fn description(&self) -> &'static str {
        match self {
            Mode::Blocking => "buffered read of the whole input, then write",
            Mode::Pull => "filtered reader consumed by a copy loop",
            Mode::Push => "filtered writer fed one block at a time",
        }
    }
}

/// Parse a `KEY=VALUE` entry; the value may be empty
fn parse_entry(raw: &str) -> Result<(String, String), CliError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(CliError::InvalidEntry(raw.to_string())),
    }
}

impl FilterArgs {
    /// Execute the filter command
    pub fn execute(&self) -> CliResult<()> {
        let config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };

        let dictionary = Arc::new(self.build_dictionary(&config)?);
        let mode = self.mode.unwrap_or(config.filter.mode);
        let chunk_size = self.chunk_size.unwrap_or(config.filter.chunk_size);
        if chunk_size == 0 {
            return Err(CliError::ConfigError("chunk size must be positive".to_string()).into());
        }

        log::info!(
            "Filtering with {} entries in {} mode",
            dictionary.len(),
            mode.as_str()
        );

        let input = open_input(self.input.as_deref())?;
        let output = open_output(self.output.as_deref())?;
        let stats = run_mode(mode, Arc::clone(&dictionary), input, output, chunk_size)?;

        log::info!(
            "Processed {} bytes, {} of {} words replaced",
            stats.bytes_in,
            stats.substitutions,
            stats.words
        );

        if self.stats || config.output.stats {
            let report = StatsReport {
                mode: mode.as_str(),
                entries: dictionary.len(),
                stats,
            };
            report.write_json(io::stderr().lock(), config.output.pretty_stats)?;
        }

        Ok(())
    }

    /// Assemble the dictionary from the file and `--entry` overrides
    fn build_dictionary(&self, config: &CliConfig) -> Result<Dictionary> {
        let path = self.dictionary.as_ref().or(config.filter.dictionary.as_ref());

        let mut dictionary_config = match path {
            Some(path) => match DictionaryConfig::from_file(path) {
                Ok(config) => config,
                Err(wordsub_core::Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
                    return Err(CliError::FileNotFound(path.display().to_string()).into());
                }
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to load dictionary: {}", path.display()));
                }
            },
            None if self.entries.is_empty() => return Err(CliError::MissingDictionary.into()),
            None => DictionaryConfig::default(),
        };

        for (key, value) in &self.entries {
            dictionary_config.insert(key.as_str(), value.as_str());
        }

        let locale = self
            .locale
            .or(config.filter.locale)
            .unwrap_or_else(|| dictionary_config.locale());
        log::debug!("Using locale {locale}");

        Ok(dictionary_config.into_dictionary_with(locale))
    }
}

/// Copy `reader` into `writer` through the filter, driven the way `mode` says
pub fn run_mode<R: Read, W: Write>(
    mode: Mode,
    dictionary: Arc<Dictionary>,
    mut reader: R,
    mut writer: W,
    chunk_size: usize,
) -> Result<FilterStats> {
    match mode {
        Mode::Blocking => Ok(BlockingFilter::new(dictionary).run(reader, writer)?),
        Mode::Pull => {
            let source = ReadSource::with_chunk_size(reader, chunk_size);
            let mut filtered = FilterReader::from_source(source, dictionary);
            io::copy(&mut filtered, &mut writer)?;
            writer.flush()?;
            Ok(filtered.stats())
        }
        Mode::Push => {
            let mut filtered = FilterWriter::new(writer, dictionary);
            let mut buffer = vec![0u8; chunk_size];
            loop {
                let n = match reader.read(&mut buffer) {
                    Ok(0) => break,
                    Ok(n) => n,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                };
                filtered.write_all(&buffer[..n])?;
            }
            filtered.finish()?;
            Ok(filtered.stats())
        }
    }
}
