//! Pull-style filtering: the consumer asks for one output byte at a time

use super::io::{Get, ReadSource, Source};
use crate::domain::{Classifier, Dictionary, FilterStats, Locale, SubstitutionAutomaton};
use std::io::{self, ErrorKind, Read};
use std::sync::Arc;

/// Input filter that reads from a [`Source`] as needed
///
/// Each call to [`next`](InputFilter::next) pulls just enough input to
/// produce one output byte. A [`Get::WouldBlock`] from the source is passed
/// up unchanged and the call can simply be repeated later.
#[derive(Debug)]
pub struct InputFilter<C = Locale> {
    automaton: SubstitutionAutomaton<C>,
}

impl<C: Classifier> InputFilter<C> {
    /// Create a filter over a shared dictionary
    pub fn new(dictionary: Arc<Dictionary<C>>) -> Self {
        Self {
            automaton: SubstitutionAutomaton::new(dictionary),
        }
    }

    /// Produce the next filtered byte
    ///
    /// Once the stream is exhausted every further call returns
    /// [`Get::Eof`] without touching the source.
    pub fn next<S: Source + ?Sized>(&mut self, source: &mut S) -> io::Result<Get> {
        loop {
            if let Some(byte) = self.automaton.drain_next() {
                return Ok(Get::Byte(byte));
            }
            if self.automaton.is_finished() {
                return Ok(Get::Eof);
            }
            match source.get()? {
                Get::Byte(b) => self.automaton.feed(b),
                Get::Eof => self.automaton.feed_eof(),
                Get::WouldBlock => return Ok(Get::WouldBlock),
            }
        }
    }

    /// Discard all state so the filter can be used on a new source
    pub fn reset(&mut self) {
        self.automaton.reset();
    }

    /// Counters for the current stream
    pub fn stats(&self) -> FilterStats {
        self.automaton.stats()
    }
}

/// An [`InputFilter`] bound to its source, usable as a [`Source`] itself
#[derive(Debug)]
pub struct FilteredSource<S, C = Locale> {
    filter: InputFilter<C>,
    source: S,
}

impl<S: Source, C: Classifier> FilteredSource<S, C> {
    /// Filter `source` through `dictionary`
    pub fn new(source: S, dictionary: Arc<Dictionary<C>>) -> Self {
        Self {
            filter: InputFilter::new(dictionary),
            source,
        }
    }

    /// Counters for the stream so far
    pub fn stats(&self) -> FilterStats {
        self.filter.stats()
    }

    /// Get a reference to the underlying source
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Unwrap the underlying source
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: Source, C: Classifier> Source for FilteredSource<S, C> {
    fn get(&mut self) -> io::Result<Get> {
        self.filter.next(&mut self.source)
    }
}

/// [`Read`] adapter applying an [`InputFilter`] to another reader
///
/// A read that already produced bytes returns them and ends early when the
/// source fails or is not ready. The next call asks the source again, so a
/// persistent error is reported then.
#[derive(Debug)]
pub struct FilterReader<R, C = Locale> {
    inner: FilteredSource<ReadSource<R>, C>,
}

impl<R: Read, C: Classifier> FilterReader<R, C> {
    /// Filter `reader` through `dictionary`
    pub fn new(reader: R, dictionary: Arc<Dictionary<C>>) -> Self {
        Self::from_source(ReadSource::new(reader), dictionary)
    }

    /// Filter an already buffered source
    pub fn from_source(source: ReadSource<R>, dictionary: Arc<Dictionary<C>>) -> Self {
        Self {
            inner: FilteredSource::new(source, dictionary),
        }
    }

    /// Counters for the stream so far
    pub fn stats(&self) -> FilterStats {
        self.inner.stats()
    }

    /// Get a reference to the underlying reader
    pub fn get_ref(&self) -> &R {
        self.inner.get_ref().get_ref()
    }
}

impl<R: Read, C: Classifier> Read for FilterReader<R, C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut written = 0;
        while written < buf.len() {
            let next = match self.inner.get() {
                Ok(next) => next,
                Err(_) if written > 0 => break,
                Err(e) => return Err(e),
            };
            match next {
                Get::Byte(b) => {
                    buf[written] = b;
                    written += 1;
                }
                Get::Eof => break,
                Get::WouldBlock if written == 0 => {
                    return Err(io::Error::new(ErrorKind::WouldBlock, "source not ready"));
                }
                Get::WouldBlock => break,
            }
        }
        Ok(written)
    }
}
