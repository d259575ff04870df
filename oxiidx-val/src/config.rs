//! VAL configuration and word layout.
//!
//! A word holds `segment_count` header bits followed by `segment_count`
//! payload segments of `scan_length` bits each:
//!
//! ```text
//! 16-bit word, 2 segments (scan length 7):
//!
//!   h0 h1 │ segment 0 (7) │ segment 1 (7)
//!
//! header 0: segment is a literal chunk
//! header 1: segment is a run:  type (1) │ count (scan_length - 1)
//! ```

use oxiidx_core::{OxiIdxError, Result, RunType, WordSize, low_mask};

/// Validated VAL configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValConfig {
    word_size: WordSize,
    segment_count: u32,
    scan_length: u32,
}

impl ValConfig {
    /// Create a configuration, rejecting segment counts that do not split
    /// the word into segments of at least 2 bits.
    pub fn new(word_size: WordSize, segment_count: u32) -> Result<Self> {
        let ws = word_size.bits();
        if segment_count == 0 || segment_count > ws {
            return Err(OxiIdxError::invalid_segment_count(ws, segment_count));
        }
        if (ws - segment_count) % segment_count != 0 {
            return Err(OxiIdxError::invalid_segment_count(ws, segment_count));
        }
        let scan_length = (ws - segment_count) / segment_count;
        if scan_length <= 1 {
            return Err(OxiIdxError::ScanLengthTooSmall { scan_length });
        }
        Ok(Self {
            word_size,
            segment_count,
            scan_length,
        })
    }

    /// Create a configuration from raw bit and segment counts.
    pub fn from_bits(word_bits: u32, segment_count: u32) -> Result<Self> {
        Self::new(WordSize::from_bits(word_bits)?, segment_count)
    }

    /// Every valid configuration, smallest words first.
    pub fn all() -> impl Iterator<Item = Self> {
        WordSize::ALL.into_iter().flat_map(|word_size| {
            (1..=word_size.bits()).filter_map(move |sc| Self::new(word_size, sc).ok())
        })
    }

    /// Output word size.
    pub const fn word_size(&self) -> WordSize {
        self.word_size
    }

    /// Word width in bits.
    pub const fn word_bits(&self) -> u32 {
        self.word_size.bits()
    }

    /// Segments per word.
    pub const fn segment_count(&self) -> u32 {
        self.segment_count
    }

    /// Payload bits per segment, which is also the input chunk width.
    pub const fn scan_length(&self) -> u32 {
        self.scan_length
    }

    /// Input bits covered by one word of literals.
    pub const fn bits_per_word(&self) -> usize {
        (self.segment_count * self.scan_length) as usize
    }

    /// Largest run a single segment can hold.
    pub const fn max_run_length(&self) -> u64 {
        low_mask(self.scan_length - 1)
    }

    /// Header bit of segment `slot`.
    pub const fn header_bit(&self, slot: u32) -> u64 {
        1u64 << (self.word_bits() - 1 - slot)
    }

    /// Shift of segment `slot`'s payload.
    pub const fn segment_shift(&self, slot: u32) -> u32 {
        (self.segment_count - 1 - slot) * self.scan_length
    }

    /// Empty word: every header bit set, every payload zero, so unfilled
    /// slots read back as runs of length 0.
    pub fn default_word(&self) -> u64 {
        (0..self.segment_count).fold(0, |word, slot| word | self.header_bit(slot))
    }

    /// Payload of a run segment.
    pub fn run_segment(&self, run_type: RunType, count: u64) -> u64 {
        debug_assert!(count <= self.max_run_length());
        (run_type.bit() << (self.scan_length - 1)) | count
    }

    /// Payload stored in segment `slot` of `word`.
    pub fn segment(&self, word: u64, slot: u32) -> u64 {
        (word >> self.segment_shift(slot)) & low_mask(self.scan_length)
    }

    /// Whether segment `slot` of `word` is a run.
    pub fn is_run(&self, word: u64, slot: u32) -> bool {
        word & self.header_bit(slot) != 0
    }

    /// Run type of a run segment payload.
    pub fn run_type(&self, segment: u64) -> RunType {
        RunType::from_bit((segment >> (self.scan_length - 1)) & 1 == 1)
    }

    /// Run length of a run segment payload.
    pub fn run_length(&self, segment: u64) -> u64 {
        segment & self.max_run_length()
    }
}

impl Default for ValConfig {
    /// 32-bit words with two 15-bit segments.
    fn default() -> Self {
        Self {
            word_size: WordSize::W32,
            segment_count: 2,
            scan_length: 15,
        }
    }
}
