//! WAH configuration and word layout.
//!
//! ```text
//! literal word:  0 │ chunk bits (word_size - 1)
//! run word:      1 │ type │ count (word_size - 2)
//! ```

use oxiidx_core::{Result, RunType, WordSize, low_mask};

/// WAH configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WahConfig {
    /// Output word width.
    pub word_size: WordSize,
}

impl WahConfig {
    /// 8-bit words: 7-bit chunks, runs of up to 63 chunks.
    pub const W8: Self = Self::new(WordSize::W8);

    /// 16-bit words.
    pub const W16: Self = Self::new(WordSize::W16);

    /// 32-bit words, the classic WAH layout.
    pub const W32: Self = Self::new(WordSize::W32);

    /// 64-bit words.
    pub const W64: Self = Self::new(WordSize::W64);

    /// Create a configuration for the given word size.
    pub const fn new(word_size: WordSize) -> Self {
        Self { word_size }
    }

    /// Create a configuration from a bit count (8, 16, 32 or 64).
    pub fn from_bits(bits: u32) -> Result<Self> {
        Ok(Self::new(WordSize::from_bits(bits)?))
    }

    /// Word width in bits.
    pub const fn word_bits(&self) -> u32 {
        self.word_size.bits()
    }

    /// Input chunk width: one bit less than the word.
    pub const fn chunk_bits(&self) -> u32 {
        self.word_bits() - 1
    }

    /// Largest run count a run word can hold.
    pub const fn max_run(&self) -> u64 {
        low_mask(self.word_bits() - 2)
    }

    /// Build a run word.
    pub fn run_word(&self, run_type: RunType, count: u64) -> u64 {
        debug_assert!(count <= self.max_run());
        let ws = self.word_bits();
        (1u64 << (ws - 1)) | (run_type.bit() << (ws - 2)) | count
    }

    /// Build a literal word from a left-aligned chunk value.
    pub fn literal_word(&self, chunk: u64) -> u64 {
        chunk & low_mask(self.chunk_bits())
    }

    /// Whether `word` is a run word.
    pub fn is_run(&self, word: u64) -> bool {
        (word >> (self.word_bits() - 1)) & 1 == 1
    }

    /// Run type of a run word.
    pub fn run_type(&self, word: u64) -> RunType {
        RunType::from_bit((word >> (self.word_bits() - 2)) & 1 == 1)
    }

    /// Run count of a run word.
    pub fn run_count(&self, word: u64) -> u64 {
        word & self.max_run()
    }
}

impl Default for WahConfig {
    fn default() -> Self {
        Self::W32
    }
}
