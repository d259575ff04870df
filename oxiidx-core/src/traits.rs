//! Core codec trait.
//!
//! Every bitmap codec implements [`BitmapCodec`]. Implementors only provide
//! a single traced encoder ([`BitmapCodec::encode_with`]) and a decoder;
//! plain and traced compression, and the bit-string conveniences, are
//! derived from them.

use crate::bitmap::Bitmap;
use crate::encoded::EncodedBitmap;
use crate::error::{OxiIdxError, Result};
use crate::trace::{NoTrace, StepRecorder};

/// A bitmap index compression codec.
pub trait BitmapCodec {
    /// Step record emitted while encoding.
    type Step;

    /// Short codec name (e.g. `"wah"`).
    fn name(&self) -> &'static str;

    /// Width in bits of one encoded unit.
    fn unit_bits(&self) -> u32;

    /// Encode `bitmap`, reporting every emission to `recorder`.
    fn encode_with<R: StepRecorder<Self::Step>>(
        &self,
        bitmap: &Bitmap,
        recorder: &mut R,
    ) -> Result<EncodedBitmap>;

    /// Decode `encoded`, truncating the result to `original_len` bits.
    fn decompress(&self, encoded: &EncodedBitmap, original_len: usize) -> Result<Bitmap>;

    /// Encode without tracing.
    fn compress(&self, bitmap: &Bitmap) -> Result<EncodedBitmap> {
        self.encode_with(bitmap, &mut NoTrace)
    }

    /// Encode and return the ordered step list alongside the output.
    fn compress_with_trace(&self, bitmap: &Bitmap) -> Result<(EncodedBitmap, Vec<Self::Step>)> {
        let mut steps = Vec::new();
        let encoded = self.encode_with(bitmap, &mut steps)?;
        Ok((encoded, steps))
    }

    /// Encode a `'0'`/`'1'` string and return the wire form.
    fn compress_str(&self, bits: &str) -> Result<String> {
        let bitmap = Bitmap::from_bit_str(bits)?;
        Ok(self.compress(&bitmap)?.to_bit_string())
    }

    /// Decode a wire-form string back into a `'0'`/`'1'` string.
    fn decompress_str(&self, encoded: &str, original_len: usize) -> Result<String> {
        let encoded = EncodedBitmap::from_bit_str(encoded, self.unit_bits())?;
        Ok(self.decompress(&encoded, original_len)?.to_bit_string())
    }
}

/// Truncate a decoded bitmap to the caller's original length.
///
/// Trailing zero padding added by the encoders is not part of the input and
/// is dropped here; asking for more bits than were decoded is an error.
pub fn finish_decoded(mut decoded: Bitmap, original_len: usize) -> Result<Bitmap> {
    if original_len > decoded.len() {
        return Err(OxiIdxError::length_mismatch(original_len, decoded.len()));
    }
    decoded.truncate(original_len);
    Ok(decoded)
}
