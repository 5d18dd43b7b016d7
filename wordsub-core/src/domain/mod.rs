//! Pure domain logic for dictionary word substitution
//!
//! This module contains the classifier contract, the dictionary and the
//! substitution automaton, without any I/O concerns.

pub mod accumulator;
pub mod automaton;
pub mod classifier;
pub mod dictionary;

pub use accumulator::WordAccumulator;
pub use automaton::{FilterStats, State, SubstitutionAutomaton};
pub use classifier::{ByteClass, Classifier, Locale};
pub use dictionary::{Dictionary, Substitution};
