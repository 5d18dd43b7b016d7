//! Configuration module

use crate::commands::filter::Mode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use wordsub_core::{adapters::DEFAULT_CHUNK_SIZE, Locale};

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Filtering configuration
    #[serde(default)]
    pub filter: FilterConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Filtering-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Dictionary file used when none is given on the command line
    pub dictionary: Option<PathBuf>,

    /// Default driving mode
    pub mode: Mode,

    /// I/O block size for the pull and push modes (bytes)
    pub chunk_size: usize,

    /// Locale overriding the dictionary's own
    pub locale: Option<Locale>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            dictionary: None,
            mode: Mode::Blocking,
            chunk_size: DEFAULT_CHUNK_SIZE,
            locale: None,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Print statistics to stderr after filtering
    pub stats: bool,

    /// Pretty print statistics JSON
    pub pretty_stats: bool,
}

impl CliConfig {
    /// Parse a TOML configuration
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    /// Load a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.filter.mode, Mode::Blocking);
        assert_eq!(config.filter.chunk_size, DEFAULT_CHUNK_SIZE);
        assert!(config.filter.dictionary.is_none());
        assert!(!config.output.stats);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = CliConfig::from_toml_str("[filter]\nmode = \"push\"\n").unwrap();
        assert_eq!(config.filter.mode, Mode::Push);
        assert_eq!(config.filter.chunk_size, DEFAULT_CHUNK_SIZE);
        assert!(!config.output.pretty_stats);
    }

    #[test]
    fn test_full_config() {
        let toml_content = r#"
[filter]
dictionary = "words.toml"
mode = "pull"
chunk_size = 16
locale = "latin1"

[output]
stats = true
pretty_stats = true
"#;
        let config = CliConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.filter.dictionary, Some(PathBuf::from("words.toml")));
        assert_eq!(config.filter.mode, Mode::Pull);
        assert_eq!(config.filter.chunk_size, 16);
        assert_eq!(config.filter.locale, Some(Locale::Latin1));
        assert!(config.output.stats);
        assert!(config.output.pretty_stats);
    }

    #[test]
    fn test_invalid_mode() {
        let result = CliConfig::from_toml_str("[filter]\nmode = \"sideways\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nstats = true").unwrap();
        let config = CliConfig::from_file(file.path()).unwrap();
        assert!(config.output.stats);
    }

    #[test]
    fn test_from_missing_file() {
        let err = CliConfig::from_file(Path::new("/nonexistent/wordsub.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = CliConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed = CliConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.filter.mode, config.filter.mode);
    }
}
