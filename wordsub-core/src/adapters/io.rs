//! Source and sink contracts used by the driving adapters

use std::io::{self, ErrorKind, Read, Write};

/// Result of asking a source (or a pull filter) for one byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Get {
    /// The next byte
    Byte(u8),
    /// No more input, ever
    Eof,
    /// No byte available right now; try again later
    WouldBlock,
}

/// A byte-at-a-time input
pub trait Source {
    /// Produce the next byte, report end of input, or report "not ready"
    fn get(&mut self) -> io::Result<Get>;
}

/// A byte output that may accept fewer bytes than offered
pub trait Sink {
    /// Write a prefix of `buf`, returning its length
    ///
    /// `Ok(0)` for a non-empty `buf` means the sink is not ready.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
}

impl<S: Source + ?Sized> Source for &mut S {
    fn get(&mut self) -> io::Result<Get> {
        (**self).get()
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (**self).write(buf)
    }
}

impl Sink for Vec<u8> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.extend_from_slice(buf);
        Ok(buf.len())
    }
}

/// Source over an in-memory byte slice
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> SliceSource<'a> {
    /// Create a source yielding `data` and then end of input
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Bytes not yet produced
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.position..]
    }
}

impl Source for SliceSource<'_> {
    fn get(&mut self) -> io::Result<Get> {
        match self.data.get(self.position) {
            Some(&b) => {
                self.position += 1;
                Ok(Get::Byte(b))
            }
            None => Ok(Get::Eof),
        }
    }
}

/// Block size used when refilling a [`ReadSource`]
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Buffered [`Source`] over any [`Read`]
///
/// `ErrorKind::WouldBlock` becomes [`Get::WouldBlock`]; `Interrupted` reads
/// are retried.
#[derive(Debug)]
pub struct ReadSource<R> {
    reader: R,
    buffer: Vec<u8>,
    position: usize,
    filled: usize,
}

impl<R: Read> ReadSource<R> {
    /// Wrap a reader using [`DEFAULT_CHUNK_SIZE`] reads
    pub fn new(reader: R) -> Self {
        Self::with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
    }

    /// Wrap a reader using reads of at most `chunk_size` bytes
    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            buffer: vec![0; chunk_size.max(1)],
            position: 0,
            filled: 0,
        }
    }

    /// Get a reference to the underlying reader
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Unwrap the reader; buffered bytes are dropped
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Source for ReadSource<R> {
    fn get(&mut self) -> io::Result<Get> {
        if self.position == self.filled {
            loop {
                match self.reader.read(&mut self.buffer) {
                    Ok(0) => return Ok(Get::Eof),
                    Ok(n) => {
                        self.position = 0;
                        self.filled = n;
                        break;
                    }
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(Get::WouldBlock),
                    Err(e) => return Err(e),
                }
            }
        }
        let byte = self.buffer[self.position];
        self.position += 1;
        Ok(Get::Byte(byte))
    }
}

/// [`Sink`] over any [`Write`]
///
/// `ErrorKind::WouldBlock` becomes `Ok(0)`; `Interrupted` writes are retried.
#[derive(Debug)]
pub struct WriteSink<W> {
    writer: W,
}

impl<W: Write> WriteSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Get a reference to the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get a mutable reference to the underlying writer
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for WriteSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        loop {
            match self.writer.write(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(0),
                Err(e) => return Err(e),
            }
        }
    }
}
