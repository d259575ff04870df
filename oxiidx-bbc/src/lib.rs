//! # OxiIdx-BBC: Byte-aligned Bitmap Code
//!
//! Byte-granularity run-length compression for bitmap indexes.
//!
//! The bitmap is zero padded to whole bytes and scanned byte by byte. Runs
//! of zero bytes are counted and stored in a 1 to 3 byte header; the bytes
//! that break a run follow verbatim as literals (up to 15 per chunk). A run
//! ended by a single *dirty* byte (exactly one bit set) is stored as a
//! *special* chunk that encodes only the dirty bit's position.
//!
//! ## State machine
//!
//! | Mode         | Byte         | Action                                              |
//! |--------------|--------------|-----------------------------------------------------|
//! | `InRuns`     | zero         | flush a pending dirty byte as a special chunk; count the run, force-flush at 32767 |
//! | `InRuns`     | dirty        | hold it; a second dirty byte turns both into literals (`InLiterals`) |
//! | `InRuns`     | other        | pending dirty byte and this byte become literals (`InLiterals`) |
//! | `InLiterals` | zero         | flush a normal chunk, start a new run (`InRuns`)    |
//! | `InLiterals` | other        | append; force-flush at 15 literals (`InRuns`)       |
//!
//! See [`header`] for the header layout.
//!
//! ## Example
//!
//! ```rust
//! use oxiidx_bbc::{compress, decompress};
//!
//! let bits = "00000000000000000000000000010000";
//! let encoded = compress(bits).unwrap();
//! // Three zero bytes and a dirty byte fit in one header byte.
//! assert_eq!(encoded, "01110011");
//!
//! let decoded = decompress(&encoded, bits.len()).unwrap();
//! assert_eq!(decoded, bits);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod decoder;
mod encoder;
pub mod header;

pub use decoder::{decode, decode_bytes};
pub use encoder::{BbcEncoder, BbcStep};

use oxiidx_core::{Bitmap, BitmapCodec, EncodedBitmap, NoTrace, Result, StepRecorder};

/// The BBC codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bbc;

impl BitmapCodec for Bbc {
    type Step = BbcStep;

    fn name(&self) -> &'static str {
        "bbc"
    }

    fn unit_bits(&self) -> u32 {
        8
    }

    fn encode_with<R: StepRecorder<Self::Step>>(
        &self,
        bitmap: &Bitmap,
        recorder: &mut R,
    ) -> Result<EncodedBitmap> {
        let bytes = BbcEncoder::new(bitmap.as_bytes(), recorder).encode()?;
        Ok(EncodedBitmap::from_bytes(&bytes))
    }

    fn decompress(&self, encoded: &EncodedBitmap, original_len: usize) -> Result<Bitmap> {
        decode(&encoded.to_bytes(), original_len)
    }
}

/// Compress a bitmap into BBC bytes.
pub fn compress_bitmap(bitmap: &Bitmap) -> Result<Vec<u8>> {
    BbcEncoder::new(bitmap.as_bytes(), &mut NoTrace).encode()
}

/// Compress a `'0'`/`'1'` string and return the encoding as a bit string.
///
/// # Example
///
/// ```rust
/// use oxiidx_bbc::compress;
///
/// assert_eq!(compress("").unwrap(), "");
/// // Six zero bytes: the largest run stored inline.
/// assert_eq!(compress(&"0".repeat(48)).unwrap(), "11000000");
/// ```
pub fn compress(bits: &str) -> Result<String> {
    Bbc.compress_str(bits)
}

/// Compress and return the per-chunk steps alongside the encoding.
pub fn compress_with_trace(bits: &str) -> Result<(String, Vec<BbcStep>)> {
    let bitmap = Bitmap::from_bit_str(bits)?;
    let (encoded, steps) = Bbc.compress_with_trace(&bitmap)?;
    Ok((encoded.to_bit_string(), steps))
}

/// Decompress a BBC bit string back into `original_len` bits.
pub fn decompress(encoded: &str, original_len: usize) -> Result<String> {
    Bbc.decompress_str(encoded, original_len)
}
