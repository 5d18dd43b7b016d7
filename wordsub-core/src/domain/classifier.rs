//! Byte classification and case mapping for word detection

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a single input byte
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteClass {
    /// Alphabetic with an uppercase form
    Uppercase,
    /// Alphabetic with a lowercase form
    Lowercase,
    /// Alphabetic without case (e.g. `ß` in Latin-1)
    Caseless,
    /// Anything that separates words
    NonAlphabetic,
}

/// Pure byte classification logic
///
/// Implementations must be deterministic: the same byte always classifies
/// and maps the same way for the lifetime of a filtering session.
pub trait Classifier: Send + Sync {
    /// Classify a byte
    fn classify(&self, byte: u8) -> ByteClass;

    /// Map a byte to its uppercase form, or return it unchanged
    fn to_upper(&self, byte: u8) -> u8;

    /// Map a byte to its lowercase form, or return it unchanged
    fn to_lower(&self, byte: u8) -> u8;

    /// Check if byte is part of a word
    fn is_alphabetic(&self, byte: u8) -> bool {
        !matches!(self.classify(byte), ByteClass::NonAlphabetic)
    }

    /// Check if byte is an uppercase letter
    fn is_uppercase(&self, byte: u8) -> bool {
        matches!(self.classify(byte), ByteClass::Uppercase)
    }
}

impl<C: Classifier + ?Sized> Classifier for &C {
    fn classify(&self, byte: u8) -> ByteClass {
        (**self).classify(byte)
    }

    fn to_upper(&self, byte: u8) -> u8 {
        (**self).to_upper(byte)
    }

    fn to_lower(&self, byte: u8) -> u8 {
        (**self).to_lower(byte)
    }
}

/// Built-in single-byte locales
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// ASCII letters only
    #[default]
    Classic,
    /// ISO-8859-1: ASCII letters plus the Latin-1 supplement letters
    Latin1,
}

impl Locale {
    /// All built-in locales
    pub const ALL: [Locale; 2] = [Locale::Classic, Locale::Latin1];

    /// Name used in configuration files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Classic => "classic",
            Locale::Latin1 => "latin1",
        }
    }

    /// Short human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Locale::Classic => "ASCII letters A-Z and a-z",
            Locale::Latin1 => "ISO-8859-1 letters (ASCII plus 0xC0-0xFF except 0xD7, 0xF7)",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" | "c" | "ascii" => Ok(Locale::Classic),
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Locale::Latin1),
            other => Err(Error::UnsupportedLocale(other.to_string())),
        }
    }
}

// Latin-1 multiplication and division signs sit inside the letter range.
const LATIN1_TIMES: u8 = 0xD7;
const LATIN1_DIVIDE: u8 = 0xF7;

impl Classifier for Locale {
    fn classify(&self, byte: u8) -> ByteClass {
        if byte.is_ascii_uppercase() {
            return ByteClass::Uppercase;
        }
        if byte.is_ascii_lowercase() {
            return ByteClass::Lowercase;
        }
        match self {
            Locale::Classic => ByteClass::NonAlphabetic,
            Locale::Latin1 => match byte {
                LATIN1_TIMES | LATIN1_DIVIDE => ByteClass::NonAlphabetic,
                0xC0..=0xDE => ByteClass::Uppercase,
                // ß and ÿ have no single-byte uppercase form
                0xDF | 0xFF => ByteClass::Caseless,
                0xE0..=0xFE => ByteClass::Lowercase,
                _ => ByteClass::NonAlphabetic,
            },
        }
    }

    fn to_upper(&self, byte: u8) -> u8 {
        match self.classify(byte) {
            ByteClass::Lowercase if byte.is_ascii() => byte.to_ascii_uppercase(),
            ByteClass::Lowercase => byte - 0x20,
            _ => byte,
        }
    }

    fn to_lower(&self, byte: u8) -> u8 {
        match self.classify(byte) {
            ByteClass::Uppercase if byte.is_ascii() => byte.to_ascii_lowercase(),
            ByteClass::Uppercase => byte + 0x20,
            _ => byte,
        }
    }
}
