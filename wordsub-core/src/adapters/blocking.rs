//! Whole-stream filtering over blocking I/O

use crate::domain::{Classifier, Dictionary, FilterStats, Locale, SubstitutionAutomaton};
use crate::error::Result;
use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::sync::Arc;

/// Runs the automaton from a reader to a writer until end of input
#[derive(Debug)]
pub struct BlockingFilter<C = Locale> {
    automaton: SubstitutionAutomaton<C>,
}

impl<C: Classifier> BlockingFilter<C> {
    /// Create a filter over a shared dictionary
    pub fn new(dictionary: Arc<Dictionary<C>>) -> Self {
        Self {
            automaton: SubstitutionAutomaton::new(dictionary),
        }
    }

    /// Filter `reader` into `writer`, returning the counters for the stream
    ///
    /// All output is written and the writer flushed before this returns.
    pub fn run<R: Read, W: Write>(&mut self, reader: R, mut writer: W) -> Result<FilterStats> {
        self.automaton.reset();
        let mut reader = BufReader::new(reader);

        loop {
            let chunk = match reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if chunk.is_empty() {
                break;
            }
            for &b in chunk {
                self.automaton.feed(b);
            }
            let n = chunk.len();
            reader.consume(n);
            self.write_pending(&mut writer)?;
        }

        self.automaton.feed_eof();
        self.write_pending(&mut writer)?;
        writer.flush()?;

        let stats = self.automaton.stats();
        log::debug!(
            "blocking filter done: {} bytes in, {} bytes out, {}/{} words substituted",
            stats.bytes_in,
            stats.bytes_out,
            stats.substitutions,
            stats.words
        );
        Ok(stats)
    }

    /// Filter an in-memory buffer
    pub fn filter_bytes(&mut self, input: &[u8]) -> Vec<u8> {
        self.automaton.reset();
        let mut out = Vec::with_capacity(input.len());
        for &b in input {
            self.automaton.feed(b);
        }
        self.automaton.feed_eof();
        out.extend_from_slice(self.automaton.pending());
        self.automaton.consume(out.len());
        out
    }

    /// Counters for the most recent stream
    pub fn stats(&self) -> FilterStats {
        self.automaton.stats()
    }

    fn write_pending<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        let pending = self.automaton.pending();
        if !pending.is_empty() {
            writer.write_all(pending)?;
            let n = pending.len();
            self.automaton.consume(n);
        }
        Ok(())
    }
}
