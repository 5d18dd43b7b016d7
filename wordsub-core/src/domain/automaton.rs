//! Word substitution state machine shared by every driving adapter
//!
//! The automaton is a pure state object: it is fed one byte (or the end of
//! input) at a time and exposes the resolved output through [`pending`] and
//! [`consume`]. It performs no I/O, so an adapter may stop at any point
//! (a source that is not ready, a sink that accepted half a word, an I/O
//! error) and resume later without losing or repeating a byte.
//!
//! Output order is fixed by the automaton: each maximal alphabetic run is
//! resolved through the dictionary, and the non-alphabetic byte that ended
//! it is queued directly after the resolution.
//!
//! [`pending`]: SubstitutionAutomaton::pending
//! [`consume`]: SubstitutionAutomaton::consume

use super::accumulator::WordAccumulator;
use super::classifier::{Classifier, Locale};
use super::dictionary::{Dictionary, Substitution};
use serde::Serialize;
use std::sync::Arc;

/// Observable state of a [`SubstitutionAutomaton`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Nothing buffered, nothing to emit
    Idle,
    /// A word is being accumulated
    Accumulating,
    /// Resolved output is waiting to be emitted
    Draining,
    /// End of input seen and all output emitted
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndOfStream {
    NotSeen,
    Draining,
    Drained,
}

/// Counters collected while filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    /// Bytes fed into the automaton
    pub bytes_in: u64,
    /// Bytes handed out to the consumer
    pub bytes_out: u64,
    /// Non-empty words resolved
    pub words: u64,
    /// Words that had a dictionary entry
    pub substitutions: u64,
}

/// Incremental word-substitution automaton
#[derive(Debug, Clone)]
pub struct SubstitutionAutomaton<C = Locale> {
    dictionary: Arc<Dictionary<C>>,
    word: WordAccumulator,
    output: Vec<u8>,
    cursor: usize,
    end: EndOfStream,
    stats: FilterStats,
}

impl<C: Classifier> SubstitutionAutomaton<C> {
    /// Create an automaton reading from a shared dictionary
    pub fn new(dictionary: Arc<Dictionary<C>>) -> Self {
        Self {
            dictionary,
            word: WordAccumulator::new(),
            output: Vec::new(),
            cursor: 0,
            end: EndOfStream::NotSeen,
            stats: FilterStats::default(),
        }
    }

    /// The dictionary used for lookups
    pub fn dictionary(&self) -> &Arc<Dictionary<C>> {
        &self.dictionary
    }

    /// Current state
    pub fn state(&self) -> State {
        if self.has_pending() {
            State::Draining
        } else if self.end != EndOfStream::NotSeen {
            State::Finished
        } else if !self.word.is_empty() {
            State::Accumulating
        } else {
            State::Idle
        }
    }

    /// Check if end of input has been fed
    pub fn is_eof(&self) -> bool {
        self.end != EndOfStream::NotSeen
    }

    /// Check if end of input has been fed and fully drained
    pub fn is_finished(&self) -> bool {
        self.end == EndOfStream::Drained
    }

    /// Counters for the current stream
    pub fn stats(&self) -> FilterStats {
        self.stats
    }

    /// Feed one input byte, classifying it with the dictionary's classifier
    pub fn feed(&mut self, byte: u8) {
        if self.dictionary.classifier().is_alphabetic(byte) {
            self.feed_alphabetic(byte);
        } else {
            self.feed_boundary(byte);
        }
    }

    /// Feed a byte known to be alphabetic
    ///
    /// The word buffer only ever holds bytes the classifier accepts as
    /// alphabetic; debug builds check this.
    pub fn feed_alphabetic(&mut self, byte: u8) {
        debug_assert!(
            self.dictionary.classifier().is_alphabetic(byte),
            "feed_alphabetic called with non-alphabetic byte {byte:#04x}"
        );
        if self.reject_after_eof(byte) {
            return;
        }
        self.stats.bytes_in += 1;
        self.word.push(byte);
    }

    /// Feed a word-ending byte: resolve the word, then queue the byte itself
    pub fn feed_boundary(&mut self, byte: u8) {
        debug_assert!(
            !self.dictionary.classifier().is_alphabetic(byte),
            "feed_boundary called with alphabetic byte {byte:#04x}"
        );
        if self.reject_after_eof(byte) {
            return;
        }
        self.stats.bytes_in += 1;
        self.resolve_word();
        self.output.push(byte);
    }

    /// Mark the end of input, resolving any trailing word
    ///
    /// Calling this more than once has no further effect.
    pub fn feed_eof(&mut self) {
        if self.is_eof() {
            return;
        }
        self.resolve_word();
        self.end = if self.has_pending() {
            EndOfStream::Draining
        } else {
            EndOfStream::Drained
        };
        log::debug!("end of input: {:?}", self.stats);
    }

    /// Resolved bytes not yet handed to the consumer
    pub fn pending(&self) -> &[u8] {
        &self.output[self.cursor..]
    }

    /// Check if resolved output is waiting
    pub fn has_pending(&self) -> bool {
        self.cursor < self.output.len()
    }

    /// Mark the first `n` pending bytes as emitted
    ///
    /// `n` is clamped to the number of pending bytes.
    pub fn consume(&mut self, n: usize) {
        let n = n.min(self.output.len() - self.cursor);
        self.cursor += n;
        self.stats.bytes_out += n as u64;
        if self.cursor == self.output.len() {
            self.output.clear();
            self.cursor = 0;
            if self.end == EndOfStream::Draining {
                self.end = EndOfStream::Drained;
            }
        }
    }

    /// Take the next pending byte, if any
    pub fn drain_next(&mut self) -> Option<u8> {
        let byte = *self.pending().first()?;
        self.consume(1);
        Some(byte)
    }

    /// Return to the initial state so the automaton can filter another stream
    ///
    /// Pending output and any partial word are discarded.
    pub fn reset(&mut self) {
        self.word.clear();
        self.output.clear();
        self.cursor = 0;
        self.end = EndOfStream::NotSeen;
        self.stats = FilterStats::default();
    }

    fn resolve_word(&mut self) {
        if self.cursor == self.output.len() {
            self.output.clear();
            self.cursor = 0;
        }
        if self.word.is_empty() {
            return;
        }

        self.stats.words += 1;
        match self.dictionary.replace(self.word.as_bytes()) {
            Substitution::Matched(text) => {
                self.stats.substitutions += 1;
                self.output.extend_from_slice(&text);
            }
            Substitution::Unmatched => self.output.extend_from_slice(self.word.as_bytes()),
        }
        self.word.clear();
    }

    fn reject_after_eof(&self, byte: u8) -> bool {
        if self.is_eof() {
            log::warn!("ignoring byte {byte:#04x} fed after end of input");
            return true;
        }
        false
    }
}
