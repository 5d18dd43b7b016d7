//! Driving adapters wiring the automaton to an I/O discipline
//!
//! - [`blocking`]: one uninterrupted loop from a reader to a writer
//! - [`pull`]: the consumer pulls one output byte at a time
//! - [`push`]: the producer pushes one input byte at a time
//!
//! All three share [`SubstitutionAutomaton`](crate::domain::SubstitutionAutomaton)
//! and therefore produce identical output for identical input.

pub mod blocking;
pub mod io;
pub mod pull;
pub mod push;

pub use blocking::BlockingFilter;
pub use io::{Get, ReadSource, Sink, SliceSource, Source, WriteSink, DEFAULT_CHUNK_SIZE};
pub use pull::{FilterReader, FilteredSource, InputFilter};
pub use push::{FilterWriter, OutputFilter};
