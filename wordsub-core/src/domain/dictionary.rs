//! Case-insensitive word dictionary with first-letter case restoration

use super::classifier::{Classifier, Locale};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Outcome of looking a word up in a [`Dictionary`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution<'a> {
    /// The word has a replacement; case restoration already applied
    Matched(Cow<'a, [u8]>),
    /// No entry; the word passes through unchanged
    Unmatched,
}

impl Substitution<'_> {
    /// Check if the lookup found an entry
    pub fn is_matched(&self) -> bool {
        matches!(self, Substitution::Matched(_))
    }
}

/// Sorted mapping from case-folded words to replacement text
///
/// Keys are stored case-folded by the dictionary's classifier; values are
/// stored exactly as given. Lookups never mutate the dictionary, so a
/// populated dictionary can be shared read-only between filters.
#[derive(Debug, Clone, Default)]
pub struct Dictionary<C = Locale> {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
    classifier: C,
    max_length: usize,
}

impl Dictionary<Locale> {
    /// Create an empty dictionary using the classic locale
    pub fn new() -> Self {
        Self::with_classifier(Locale::Classic)
    }
}

impl<C: Classifier> Dictionary<C> {
    /// Create an empty dictionary using the given classifier
    pub fn with_classifier(classifier: C) -> Self {
        Self {
            entries: BTreeMap::new(),
            classifier,
            max_length: 0,
        }
    }

    /// Add an entry, overwriting any value stored under the same folded key
    ///
    /// Empty keys are stored but can never match, since the filter never
    /// looks up an empty word.
    pub fn add(&mut self, key: impl AsRef<[u8]>, value: impl Into<Vec<u8>>) {
        let key = key.as_ref();
        self.max_length = self.max_length.max(key.len());
        let folded = self.case_fold(key);
        self.entries.insert(folded, value.into());
    }

    /// Look up `word` and return its replacement
    ///
    /// When the first byte of `word` is an uppercase letter, the first byte
    /// of the replacement is upper-cased. Casing elsewhere in `word` is
    /// ignored.
    pub fn replace<'a>(&'a self, word: &[u8]) -> Substitution<'a> {
        let Some(&first) = word.first() else {
            return Substitution::Unmatched;
        };
        let Some(value) = self.entries.get(&self.case_fold(word)) else {
            return Substitution::Unmatched;
        };

        let restore = self.classifier.is_uppercase(first)
            && value
                .first()
                .is_some_and(|&b| self.classifier.to_upper(b) != b);

        if restore {
            let mut owned = value.clone();
            owned[0] = self.classifier.to_upper(owned[0]);
            Substitution::Matched(Cow::Owned(owned))
        } else {
            Substitution::Matched(Cow::Borrowed(value))
        }
    }

    /// Lower every byte of `text` with this dictionary's classifier
    pub fn case_fold(&self, text: &[u8]) -> Vec<u8> {
        text.iter().map(|&b| self.classifier.to_lower(b)).collect()
    }

    /// Stored value for `key`, without case restoration
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.entries.get(&self.case_fold(key)).map(Vec::as_slice)
    }

    /// Length of the longest key ever added
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Number of distinct folded keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the dictionary has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The classifier used for folding and word detection
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Iterate over `(folded key, value)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_slice(), v.as_slice()))
    }
}

impl<C: Classifier, K: AsRef<[u8]>, V: Into<Vec<u8>>> Extend<(K, V)> for Dictionary<C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl<K: AsRef<[u8]>, V: Into<Vec<u8>>> FromIterator<(K, V)> for Dictionary<Locale> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dictionary = Dictionary::new();
        dictionary.extend(iter);
        dictionary
    }
}
