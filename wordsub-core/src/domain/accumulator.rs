//! Buffer for the alphabetic run currently being scanned

use smallvec::SmallVec;

/// Inline capacity; longer words spill to the heap.
const INLINE_WORD_BYTES: usize = 32;

/// Accumulates the bytes of the word in progress
#[derive(Debug, Clone, Default)]
pub struct WordAccumulator {
    bytes: SmallVec<[u8; INLINE_WORD_BYTES]>,
}

impl WordAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one alphabetic byte
    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    /// The word so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes accumulated
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if no word is in progress
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Discard the word in progress
    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}
