//! BBC decoder (decompression).

use crate::header::{ChunkKind, decode_header};
use oxiidx_core::{Bitmap, OxiIdxError, Result};
use tracing::debug;

/// Expand a BBC encoding back into padded bytes.
pub fn decode_bytes(encoded: &[u8]) -> Result<Vec<u8>> {
    decode_bytes_capped(encoded, usize::MAX)
}

/// Expand at most `max_bytes` bytes. Run headers are clamped to what is
/// left, so oversized run counts in damaged input cannot blow up the output.
fn decode_bytes_capped(encoded: &[u8], max_bytes: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(encoded.len().saturating_mul(2).min(max_bytes));
    let mut pos = 0;

    while pos < encoded.len() && out.len() < max_bytes {
        let header = decode_header(encoded, pos)?;
        pos += header.len;
        let runs = header.runs.min(max_bytes - out.len());
        out.resize(out.len() + runs, 0);

        match header.kind {
            ChunkKind::Special { position } => out.push(0x80 >> position),
            ChunkKind::Normal { literals } => {
                let end = pos + literals;
                let tail = encoded.get(pos..end).ok_or_else(|| {
                    OxiIdxError::unexpected_eof(encoded.len())
                })?;
                out.extend_from_slice(tail);
                pos = end;
            }
        }
    }

    debug!(
        input_bytes = encoded.len(),
        output_bytes = out.len(),
        "bbc decode complete"
    );
    Ok(out)
}

/// Decode a BBC encoding into a bitmap of `original_len` bits.
///
/// Decoding stops once `original_len` bits are available.
pub fn decode(encoded: &[u8], original_len: usize) -> Result<Bitmap> {
    let bytes = decode_bytes_capped(encoded, original_len.div_ceil(8))?;
    Bitmap::from_bytes(&bytes, original_len)
}
