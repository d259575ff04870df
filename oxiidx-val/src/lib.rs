//! # OxiIdx-VAL: Variable-length Aligned Lists
//!
//! A WAH generalization that packs several segments into each output word.
//!
//! A `word_size`-bit word with `segment_count` segments starts with one
//! header bit per segment, followed by the segments themselves, each
//! `scan_length = (word_size - segment_count) / segment_count` bits wide.
//! The input is scanned in `scan_length`-bit chunks:
//!
//! - A literal chunk is copied into the next free segment and its header
//!   bit is cleared.
//! - A run of all-ones or all-zeros chunks becomes a run segment
//!   (`type │ count`) with its header bit set. One segment holds at most
//!   `2^(scan_length - 1) - 1` chunks.
//!
//! A word is emitted once all of its segments are filled. At the end of
//! the input a partially filled word is emitted as is; its free slots read
//! back as runs of length 0.
//!
//! ## Example
//!
//! ```rust
//! use oxiidx_val::{compress, decompress};
//!
//! let bits = "1".repeat(14) + "1010001";
//! let encoded = compress(&bits, 16, 2).unwrap();
//! assert_eq!(encoded, "10".to_string() + "1000010" + "1010001");
//!
//! let decoded = decompress(&encoded, 16, 2, bits.len()).unwrap();
//! assert_eq!(decoded, bits);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
mod encoder;

pub use config::ValConfig;
pub use decoder::decode;
pub use encoder::{ValEncoder, ValStep};

use oxiidx_core::{Bitmap, BitmapCodec, EncodedBitmap, Result, StepRecorder};

/// The VAL codec for one word size and segment count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Val {
    config: ValConfig,
}

impl Val {
    /// Create a codec with the given configuration.
    pub const fn new(config: ValConfig) -> Self {
        Self { config }
    }

    /// Create a codec from a word size and segment count.
    pub fn with_layout(word_bits: u32, segment_count: u32) -> Result<Self> {
        Ok(Self::new(ValConfig::from_bits(word_bits, segment_count)?))
    }

    /// The codec configuration.
    pub fn config(&self) -> ValConfig {
        self.config
    }
}

impl BitmapCodec for Val {
    type Step = ValStep;

    fn name(&self) -> &'static str {
        "val"
    }

    fn unit_bits(&self) -> u32 {
        self.config.word_bits()
    }

    fn encode_with<R: StepRecorder<Self::Step>>(
        &self,
        bitmap: &Bitmap,
        recorder: &mut R,
    ) -> Result<EncodedBitmap> {
        Ok(ValEncoder::new(self.config, recorder).encode(bitmap))
    }

    fn decompress(&self, encoded: &EncodedBitmap, original_len: usize) -> Result<Bitmap> {
        decode(encoded.units(), self.config, original_len)
    }
}

/// Compress a `'0'`/`'1'` string.
///
/// The layout is validated before any input is read.
pub fn compress(bits: &str, word_size: u32, segment_count: u32) -> Result<String> {
    Val::with_layout(word_size, segment_count)?.compress_str(bits)
}

/// Compress and return one step per placed segment alongside the encoding.
pub fn compress_with_trace(
    bits: &str,
    word_size: u32,
    segment_count: u32,
) -> Result<(String, Vec<ValStep>)> {
    let codec = Val::with_layout(word_size, segment_count)?;
    let bitmap = Bitmap::from_bit_str(bits)?;
    let (encoded, steps) = codec.compress_with_trace(&bitmap)?;
    Ok((encoded.to_bit_string(), steps))
}

/// Decompress a VAL bit string back into `original_len` bits.
pub fn decompress(
    encoded: &str,
    word_size: u32,
    segment_count: u32,
    original_len: usize,
) -> Result<String> {
    Val::with_layout(word_size, segment_count)?.decompress_str(encoded, original_len)
}
