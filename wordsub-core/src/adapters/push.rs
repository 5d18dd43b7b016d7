//! Push-style filtering: the producer hands over one byte at a time

use super::io::{Sink, WriteSink};
use crate::domain::{Classifier, Dictionary, FilterStats, Locale, SubstitutionAutomaton};
use std::io::{self, ErrorKind, Write};
use std::sync::Arc;

/// Output filter that forwards resolved words to a [`Sink`]
///
/// [`put`](OutputFilter::put) returns `false` when output from an earlier
/// word could not be written completely; the caller must offer the same byte
/// again later. [`close`](OutputFilter::close) follows the same protocol.
#[derive(Debug)]
pub struct OutputFilter<C = Locale> {
    automaton: SubstitutionAutomaton<C>,
}

impl<C: Classifier> OutputFilter<C> {
    /// Create a filter over a shared dictionary
    pub fn new(dictionary: Arc<Dictionary<C>>) -> Self {
        Self {
            automaton: SubstitutionAutomaton::new(dictionary),
        }
    }

    /// Offer one input byte
    ///
    /// Any previously resolved output is written first, with a single sink
    /// write. Returns `Ok(false)` without accepting `byte` if that write was
    /// partial. Bytes put after [`close`](OutputFilter::close) are dropped.
    pub fn put<K: Sink + ?Sized>(&mut self, sink: &mut K, byte: u8) -> io::Result<bool> {
        if self.automaton.has_pending() && !self.write_pending(sink)? {
            return Ok(false);
        }
        self.automaton.feed(byte);
        Ok(true)
    }

    /// Write resolved output without ending the stream
    ///
    /// A partial word is kept, since a later byte may extend it. Returns
    /// `Ok(true)` once nothing resolved is left.
    pub fn flush<K: Sink + ?Sized>(&mut self, sink: &mut K) -> io::Result<bool> {
        if self.automaton.has_pending() {
            return self.write_pending(sink);
        }
        Ok(true)
    }

    /// End the stream, resolving and writing any trailing word
    ///
    /// Returns `Ok(false)` while output remains; call again until it
    /// returns `Ok(true)`.
    pub fn close<K: Sink + ?Sized>(&mut self, sink: &mut K) -> io::Result<bool> {
        self.automaton.feed_eof();
        self.flush(sink)
    }

    /// Number of resolved bytes waiting for the sink
    pub fn pending_len(&self) -> usize {
        self.automaton.pending().len()
    }

    /// Check if the stream was closed and fully written
    pub fn is_closed(&self) -> bool {
        self.automaton.is_finished()
    }

    /// Discard all state so the filter can be used on a new stream
    pub fn reset(&mut self) {
        self.automaton.reset();
    }

    /// Counters for the current stream
    pub fn stats(&self) -> FilterStats {
        self.automaton.stats()
    }

    fn write_pending<K: Sink + ?Sized>(&mut self, sink: &mut K) -> io::Result<bool> {
        let written = sink.write(self.automaton.pending())?;
        self.automaton.consume(written);
        Ok(!self.automaton.has_pending())
    }
}

/// [`Write`] adapter applying an [`OutputFilter`] in front of another writer
///
/// Call [`finish`](FilterWriter::finish) to write the trailing word; it is
/// not written on drop. An error from the inner writer is returned only when
/// no byte of the current call has been accepted.
#[derive(Debug)]
pub struct FilterWriter<W, C = Locale> {
    filter: OutputFilter<C>,
    sink: WriteSink<W>,
}

impl<W: Write, C: Classifier> FilterWriter<W, C> {
    /// Filter everything written into `writer` through `dictionary`
    pub fn new(writer: W, dictionary: Arc<Dictionary<C>>) -> Self {
        Self {
            filter: OutputFilter::new(dictionary),
            sink: WriteSink::new(writer),
        }
    }

    /// End the stream and flush the underlying writer
    pub fn finish(&mut self) -> io::Result<()> {
        self.drive(|filter, sink| filter.close(sink))?;
        self.sink.flush()
    }

    /// Counters for the stream so far
    pub fn stats(&self) -> FilterStats {
        self.filter.stats()
    }

    /// Get a reference to the underlying writer
    pub fn get_ref(&self) -> &W {
        self.sink.get_ref()
    }

    /// Unwrap the underlying writer
    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }

    // Repeat `step` while the sink keeps accepting bytes.
    fn drive<F>(&mut self, mut step: F) -> io::Result<()>
    where
        F: FnMut(&mut OutputFilter<C>, &mut WriteSink<W>) -> io::Result<bool>,
    {
        loop {
            let before = self.filter.pending_len();
            if step(&mut self.filter, &mut self.sink)? {
                return Ok(());
            }
            if self.filter.pending_len() == before {
                return Err(io::Error::new(ErrorKind::WouldBlock, "sink not ready"));
            }
        }
    }
}

impl<W: Write, C: Classifier> Write for FilterWriter<W, C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut accepted = 0;
        for &b in buf {
            if accepted == 0 {
                self.drive(|filter, sink| filter.put(sink, b))?;
            } else if !matches!(self.filter.put(&mut self.sink, b), Ok(true)) {
                // Already accepted bytes are reported; a lasting error
                // resurfaces on the next call.
                break;
            }
            accepted += 1;
        }
        Ok(accepted)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.drive(|filter, sink| filter.flush(sink))?;
        self.sink.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> Arc<Dictionary> {
        Arc::new([("cat", "dog"), ("sat", "stood")].into_iter().collect())
    }

    /// Sink accepting at most `limit` bytes per call
    struct Trickle {
        out: Vec<u8>,
        limit: usize,
    }

    impl Sink for Trickle {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.limit);
            self.out.extend_from_slice(&buf[..n]);
            Ok(n)
        }
    }

    fn push_all(filter: &mut OutputFilter, sink: &mut impl Sink, input: &[u8]) {
        for &b in input {
            while !filter.put(sink, b).unwrap() {}
        }
        while !filter.close(sink).unwrap() {}
    }

    #[test]
    fn test_put_and_close() {
        let mut filter = OutputFilter::new(dictionary());
        let mut sink: Vec<u8> = Vec::new();
        push_all(&mut filter, &mut sink, b"The cat sat");
        assert_eq!(sink, b"The dog stood");
        assert!(filter.is_closed());
    }

    #[test]
    fn test_one_byte_sink() {
        let mut filter = OutputFilter::new(dictionary());
        let mut sink = Trickle {
            out: Vec::new(),
            limit: 1,
        };
        push_all(&mut filter, &mut sink, b"Cat, CAT; sat.");
        assert_eq!(sink.out, b"Dog, Dog; stood.");
    }

    #[test]
    fn test_partial_write_rejects_byte() {
        let mut filter = OutputFilter::new(dictionary());
        let mut sink = Trickle {
            out: Vec::new(),
            limit: 2,
        };
        for &b in b"cat " {
            assert!(filter.put(&mut sink, b).unwrap());
        }
        // "dog " is pending; only "do" fits
        assert!(!filter.put(&mut sink, b'x').unwrap());
        assert_eq!(sink.out, b"do");
        assert_eq!(filter.pending_len(), 2);
        assert!(filter.put(&mut sink, b'x').unwrap());
        assert_eq!(sink.out, b"dog ");
    }

    #[test]
    fn test_close_retries_until_drained() {
        let mut filter = OutputFilter::new(dictionary());
        let mut sink = Trickle {
            out: Vec::new(),
            limit: 0,
        };
        for &b in b"sat" {
            assert!(filter.put(&mut sink, b).unwrap());
        }
        assert!(!filter.close(&mut sink).unwrap());
        assert!(!filter.close(&mut sink).unwrap());
        sink.limit = 3;
        assert!(!filter.close(&mut sink).unwrap());
        assert!(filter.close(&mut sink).unwrap());
        assert!(filter.close(&mut sink).unwrap());
        assert_eq!(sink.out, b"stood");
    }

    #[test]
    fn test_flush_keeps_partial_word() {
        let mut filter = OutputFilter::new(dictionary());
        let mut sink: Vec<u8> = Vec::new();
        for &b in b"a ca" {
            filter.put(&mut sink, b).unwrap();
        }
        assert!(filter.flush(&mut sink).unwrap());
        assert_eq!(sink, b"a ");
        filter.put(&mut sink, b't').unwrap();
        filter.close(&mut sink).unwrap();
        assert_eq!(sink, b"a dog");
    }

    #[test]
    fn test_sink_error_leaves_state_intact() {
        struct FailOnce {
            out: Vec<u8>,
            failed: bool,
        }

        impl Sink for FailOnce {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                if !self.failed {
                    self.failed = true;
                    return Err(io::Error::new(ErrorKind::Other, "transient"));
                }
                self.out.extend_from_slice(buf);
                Ok(buf.len())
            }
        }

        let mut filter = OutputFilter::new(dictionary());
        let mut sink = FailOnce {
            out: Vec::new(),
            failed: false,
        };
        for &b in b"cat" {
            filter.put(&mut sink, b).unwrap();
        }
        assert!(filter.put(&mut sink, b' ').unwrap());
        assert!(filter.put(&mut sink, b'a').is_err());
        assert!(filter.put(&mut sink, b'a').unwrap());
        assert!(filter.close(&mut sink).unwrap());
        assert_eq!(sink.out, b"dog a");
    }

    #[test]
    fn test_filter_writer() {
        let mut writer = FilterWriter::new(Vec::<u8>::new(), dictionary());
        writer.write_all(b"The Cat ").unwrap();
        writer.write_all(b"sa").unwrap();
        writer.write_all(b"t").unwrap();
        writer.finish().unwrap();
        assert_eq!(writer.stats().substitutions, 2);
        assert_eq!(writer.into_inner(), b"The Dog stood");
    }

    /// Writer that fails once on call `fail_on` and otherwise takes everything
    struct FlakyWriter {
        out: Vec<u8>,
        calls: usize,
        fail_on: usize,
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.calls += 1;
            if self.calls == self.fail_on {
                return Err(io::Error::new(ErrorKind::Other, "transient"));
            }
            self.out.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Write `input` resuming after whatever each call accepted
    fn write_with_retries<W: Write>(writer: &mut W, input: &[u8]) -> usize {
        let mut position = 0;
        let mut errors = 0;
        while position < input.len() {
            match writer.write(&input[position..]) {
                Ok(n) => position += n,
                Err(_) => errors += 1,
            }
        }
        errors
    }

    #[test]
    fn test_filter_writer_does_not_repeat_accepted_bytes() {
        let flaky = FlakyWriter {
            out: Vec::new(),
            calls: 0,
            fail_on: 2,
        };
        let mut writer = FilterWriter::new(flaky, dictionary());
        assert_eq!(write_with_retries(&mut writer, b"a b c"), 0);
        writer.finish().unwrap();
        assert_eq!(writer.get_ref().out, b"a b c");
        assert_eq!(writer.stats().words, 3);
    }

    #[test]
    fn test_filter_writer_reports_error_before_any_byte() {
        let flaky = FlakyWriter {
            out: Vec::new(),
            calls: 0,
            fail_on: 1,
        };
        let mut writer = FilterWriter::new(flaky, dictionary());
        assert_eq!(writer.write(b"cat ").unwrap(), 4);
        // The pending "dog " meets the failing write with nothing accepted yet
        assert!(writer.write(b"x").is_err());
        assert_eq!(write_with_retries(&mut writer, b"x"), 0);
        writer.finish().unwrap();
        assert_eq!(writer.into_inner().out, b"dog x");
    }

    #[test]
    fn test_filter_writer_would_block() {
        struct Full;
        impl Write for Full {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(ErrorKind::WouldBlock, "full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut writer = FilterWriter::new(Full, dictionary());
        assert_eq!(writer.write(b"cat ").unwrap(), 4);
        let err = writer.write(b"x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WouldBlock);
    }
}
