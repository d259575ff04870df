//! VAL decoder (decompression).

use crate::config::ValConfig;
use oxiidx_core::{Bitmap, Result, RunType, finish_decoded, low_mask};
use tracing::debug;

/// Decode VAL words into a bitmap of `original_len` bits.
///
/// Segments are read in slot order. Run expansion stops once
/// `original_len` bits are available.
pub fn decode(words: &[u64], config: ValConfig, original_len: usize) -> Result<Bitmap> {
    let scan = config.scan_length();
    let ones = low_mask(scan);
    let mut bitmap = Bitmap::with_capacity(original_len);

    'words: for &word in words {
        for slot in 0..config.segment_count() {
            if bitmap.len() >= original_len {
                break 'words;
            }
            let segment = config.segment(word, slot);
            if !config.is_run(word, slot) {
                bitmap.push_bits(segment, scan);
                continue;
            }
            let remaining = (original_len - bitmap.len()).div_ceil(scan as usize) as u64;
            let count = config.run_length(segment).min(remaining);
            let value = match config.run_type(segment) {
                RunType::Ones => ones,
                RunType::Zeros => 0,
            };
            bitmap.push_repeated(value, scan, count);
        }
    }

    debug!(
        word_size = config.word_bits(),
        segment_count = config.segment_count(),
        words = words.len(),
        output_bits = bitmap.len(),
        "val decode complete"
    );
    finish_decoded(bitmap, original_len)
}
