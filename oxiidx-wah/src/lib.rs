//! # OxiIdx-WAH: Word-Aligned Hybrid
//!
//! Word-granularity run-length compression for bitmap indexes.
//!
//! The bitmap is cut into chunks one bit narrower than the output word.
//! Each chunk is all-ones, all-zeros, or a literal:
//!
//! - Consecutive all-ones or all-zeros chunks collapse into a single *run
//!   word* (`1 │ type │ count`), flushed when the type changes, a literal
//!   arrives, or the count reaches `2^(word_size - 2) - 1`.
//! - Any other chunk is a *literal word* (`0 │ chunk`).
//! - A short final chunk is always a literal, even if it is all ones.
//!
//! Word sizes 8, 16, 32 and 64 share one `u64` code path.
//!
//! ## Example
//!
//! ```rust
//! use oxiidx_wah::{compress, decompress};
//!
//! let bits = "1010001".to_string() + &"1".repeat(14);
//! let encoded = compress(&bits, 8).unwrap();
//! assert_eq!(encoded, "0101000111000010");
//!
//! let decoded = decompress(&encoded, 8, bits.len()).unwrap();
//! assert_eq!(decoded, bits);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
mod encoder;

pub use config::WahConfig;
pub use decoder::decode;
pub use encoder::{WahEncoder, WahStep};

use oxiidx_core::{Bitmap, BitmapCodec, EncodedBitmap, Result, StepRecorder};

/// The WAH codec for one word size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wah {
    config: WahConfig,
}

impl Wah {
    /// Create a codec with the given configuration.
    pub const fn new(config: WahConfig) -> Self {
        Self { config }
    }

    /// Create a codec from a word size in bits.
    pub fn with_word_bits(bits: u32) -> Result<Self> {
        Ok(Self::new(WahConfig::from_bits(bits)?))
    }

    /// The codec configuration.
    pub fn config(&self) -> WahConfig {
        self.config
    }
}

impl BitmapCodec for Wah {
    type Step = WahStep;

    fn name(&self) -> &'static str {
        "wah"
    }

    fn unit_bits(&self) -> u32 {
        self.config.word_bits()
    }

    fn encode_with<R: StepRecorder<Self::Step>>(
        &self,
        bitmap: &Bitmap,
        recorder: &mut R,
    ) -> Result<EncodedBitmap> {
        Ok(WahEncoder::new(self.config, recorder).encode(bitmap))
    }

    fn decompress(&self, encoded: &EncodedBitmap, original_len: usize) -> Result<Bitmap> {
        decode(encoded.units(), self.config, original_len)
    }
}

/// Compress a `'0'`/`'1'` string with `word_size`-bit words.
///
/// Returns [`oxiidx_core::OxiIdxError::UnsupportedWordSize`] unless
/// `word_size` is 8, 16, 32 or 64.
pub fn compress(bits: &str, word_size: u32) -> Result<String> {
    Wah::with_word_bits(word_size)?.compress_str(bits)
}

/// Compress and return one step per emitted word alongside the encoding.
pub fn compress_with_trace(bits: &str, word_size: u32) -> Result<(String, Vec<WahStep>)> {
    let codec = Wah::with_word_bits(word_size)?;
    let bitmap = Bitmap::from_bit_str(bits)?;
    let (encoded, steps) = codec.compress_with_trace(&bitmap)?;
    Ok((encoded.to_bit_string(), steps))
}

/// Decompress a WAH bit string back into `original_len` bits.
pub fn decompress(encoded: &str, word_size: u32, original_len: usize) -> Result<String> {
    Wah::with_word_bits(word_size)?.decompress_str(encoded, original_len)
}
