use super::types::DictionaryConfig;
use crate::domain::{Dictionary, Locale};
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// On-disk dictionary format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryFormat {
    /// TOML document with `[metadata]` and `[entries]` tables
    Toml,
    /// One `key replacement` pair per line
    WordList,
}

impl DictionaryFormat {
    /// Pick the format from a file extension: `.toml` is TOML, anything else a word list
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => DictionaryFormat::Toml,
            _ => DictionaryFormat::WordList,
        }
    }
}

impl DictionaryConfig {
    /// Parse a TOML dictionary
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a plain word list
    ///
    /// Blank lines and lines starting with `#` are skipped. The key ends at
    /// the first whitespace; the rest of the line, trimmed, is the value.
    pub fn from_word_list(content: &str) -> Result<Self> {
        let mut config = DictionaryConfig::default();

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (key, value) = line
                .split_once(char::is_whitespace)
                .map(|(key, rest)| (key, rest.trim()))
                .filter(|(_, value)| !value.is_empty())
                .ok_or_else(|| Error::WordList {
                    line: index + 1,
                    reason: format!("missing replacement for '{line}'"),
                })?;

            config.entries.insert(key.to_string(), value.to_string());
        }

        Ok(config)
    }

    /// Load a dictionary file, choosing the format by extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let format = DictionaryFormat::from_path(path);
        log::debug!("loading {format:?} dictionary from {}", path.display());

        match format {
            DictionaryFormat::Toml => Self::from_toml_str(&content),
            DictionaryFormat::WordList => Self::from_word_list(&content),
        }
    }

    /// Add or replace one entry
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Copy entries from `other`, overriding existing keys
    pub fn merge(&mut self, other: DictionaryConfig) {
        self.entries.extend(other.entries);
    }

    /// Locale declared by the file
    pub fn locale(&self) -> Locale {
        self.metadata.locale
    }

    /// Build a dictionary using the declared locale
    pub fn into_dictionary(self) -> Dictionary {
        let locale = self.locale();
        self.into_dictionary_with(locale)
    }

    /// Build a dictionary using an explicit locale
    pub fn into_dictionary_with(self, locale: Locale) -> Dictionary {
        let mut dictionary = Dictionary::with_classifier(locale);
        dictionary.extend(self.entries);
        dictionary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    const ANIMALS_TOML: &str = r#"
[metadata]
name = "animals"
locale = "latin1"

[entries]
cat = "dog"
Mouse = "elephant"
"#;

    #[test]
    fn test_from_toml_str() {
        let config = DictionaryConfig::from_toml_str(ANIMALS_TOML).unwrap();
        assert_eq!(config.metadata.name.as_deref(), Some("animals"));
        assert_eq!(config.locale(), Locale::Latin1);
        assert_eq!(config.entries.len(), 2);
    }

    #[test]
    fn test_toml_defaults() {
        let config = DictionaryConfig::from_toml_str("[entries]\na = \"b\"\n").unwrap();
        assert_eq!(config.locale(), Locale::Classic);
        assert!(config.metadata.name.is_none());

        let empty = DictionaryConfig::from_toml_str("").unwrap();
        assert!(empty.entries.is_empty());
    }

    #[test]
    fn test_toml_invalid_locale() {
        let result = DictionaryConfig::from_toml_str("[metadata]\nlocale = \"klingon\"\n");
        assert!(matches!(result, Err(Error::Toml(_))));
    }

    #[test]
    fn test_toml_syntax_error() {
        let result = DictionaryConfig::from_toml_str("[entries\ncat = ");
        assert!(matches!(result, Err(Error::Toml(_))));
    }

    #[test]
    fn test_from_word_list() {
        let content = "# animals\n\ncat dog\nmouse   big elephant  \n";
        let config = DictionaryConfig::from_word_list(content).unwrap();
        assert_eq!(config.entries["cat"], "dog");
        assert_eq!(config.entries["mouse"], "big elephant");
        assert_eq!(config.entries.len(), 2);
    }

    #[test]
    fn test_word_list_tab_separated() {
        let config = DictionaryConfig::from_word_list("colour\tcolor\n").unwrap();
        assert_eq!(config.entries["colour"], "color");
    }

    #[test]
    fn test_word_list_missing_value() {
        match DictionaryConfig::from_word_list("cat dog\nlonely\n") {
            Err(Error::WordList { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("lonely"));
            }
            other => panic!("Expected WordList error, got {other:?}"),
        }
    }

    #[test]
    fn test_into_dictionary_folds_keys() {
        let dictionary = DictionaryConfig::from_toml_str(ANIMALS_TOML)
            .unwrap()
            .into_dictionary();
        assert_eq!(*dictionary.classifier(), Locale::Latin1);
        assert_eq!(dictionary.get(b"mouse"), Some(&b"elephant"[..]));
        assert_eq!(dictionary.max_length(), 5);
    }

    #[test]
    fn test_merge_overrides() {
        let mut config = DictionaryConfig::from_word_list("cat dog\nsat stood\n").unwrap();
        let mut overrides = DictionaryConfig::default();
        overrides.insert("cat", "lion");
        config.merge(overrides);
        assert_eq!(config.entries["cat"], "lion");
        assert_eq!(config.entries["sat"], "stood");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DictionaryFormat::from_path(Path::new("dict.TOML")),
            DictionaryFormat::Toml
        );
        assert_eq!(
            DictionaryFormat::from_path(Path::new("dict.txt")),
            DictionaryFormat::WordList
        );
        assert_eq!(
            DictionaryFormat::from_path(Path::new("words")),
            DictionaryFormat::WordList
        );
    }

    #[test]
    fn test_from_file_toml() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(ANIMALS_TOML.as_bytes()).unwrap();
        let config = DictionaryConfig::from_file(file.path()).unwrap();
        assert_eq!(config.entries["cat"], "dog");
    }

    #[test]
    fn test_from_file_word_list() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "cat dog").unwrap();
        let config = DictionaryConfig::from_file(file.path()).unwrap();
        assert_eq!(config.entries["cat"], "dog");
    }

    #[test]
    fn test_from_file_missing() {
        let result = DictionaryConfig::from_file("/nonexistent/dictionary.toml");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
