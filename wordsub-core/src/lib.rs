//! Streaming dictionary word substitution
//!
//! This crate replaces whole words with dictionary equivalents while passing
//! every non-alphabetic byte through unchanged. When the original word starts
//! with an uppercase letter, so does its replacement.
//!
//! # Architecture
//!
//! - **Domain layer**: classifier, dictionary and the substitution automaton,
//!   a pure state object fed one byte at a time
//! - **Adapter layer**: pull, push and blocking drivers over the same
//!   automaton, tolerant of sources that are not ready and sinks that accept
//!   partial writes
//! - **Config layer**: dictionary files in TOML or word-list form
//!
//! # Example
//!
//! ```rust
//! use wordsub_core::{BlockingFilter, Dictionary};
//! use std::sync::Arc;
//!
//! let mut dictionary = Dictionary::new();
//! dictionary.add("cat", "dog");
//!
//! let mut filter = BlockingFilter::new(Arc::new(dictionary));
//! let output = filter.filter_bytes(b"The Cat sat.");
//! assert_eq!(output, b"The Dog sat.");
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;

pub use adapters::{
    BlockingFilter, FilterReader, FilterWriter, FilteredSource, Get, InputFilter, OutputFilter,
    ReadSource, Sink, SliceSource, Source, WriteSink,
};
pub use config::{DictionaryConfig, DictionaryFormat};
pub use domain::{
    ByteClass, Classifier, Dictionary, FilterStats, Locale, State, Substitution,
    SubstitutionAutomaton, WordAccumulator,
};
pub use error::{Error, Result};
