//! WAH decoder (decompression).

use crate::config::WahConfig;
use oxiidx_core::{Bitmap, Result, RunType, finish_decoded, low_mask};
use tracing::debug;

/// Decode WAH words into a bitmap of `original_len` bits.
///
/// Decoding stops once `original_len` bits are available, so oversized run
/// counts in damaged input cannot blow up the output.
pub fn decode(words: &[u64], config: WahConfig, original_len: usize) -> Result<Bitmap> {
    let chunk_bits = config.chunk_bits();
    let ones = low_mask(chunk_bits);
    let mut bitmap = Bitmap::with_capacity(original_len);

    for &word in words {
        if bitmap.len() >= original_len {
            break;
        }
        if config.is_run(word) {
            let remaining = (original_len - bitmap.len()).div_ceil(chunk_bits as usize) as u64;
            let count = config.run_count(word).min(remaining);
            let value = match config.run_type(word) {
                RunType::Ones => ones,
                RunType::Zeros => 0,
            };
            bitmap.push_repeated(value, chunk_bits, count);
        } else {
            bitmap.push_bits(word & ones, chunk_bits);
        }
    }

    debug!(
        word_size = config.word_bits(),
        words = words.len(),
        output_bits = bitmap.len(),
        "wah decode complete"
    );
    finish_decoded(bitmap, original_len)
}
