//! BBC chunk headers.
//!
//! Every encoded chunk starts with a header byte:
//!
//! ```text
//!   7   6   5   4   3   2   1   0
//! ┌───────────┬───┬───────────────┐
//! │   runs    │ S │  literals/pos │
//! └───────────┴───┴───────────────┘
//! ```
//!
//! - `runs` (3 bits): number of zero bytes before the tail, 0-6 inline. The
//!   value `0b111` is an escape: the count follows in one byte (7-127) or
//!   in two bytes with the first byte's high bit set (128-32767).
//! - `S`: set for a *special* chunk whose tail is a single dirty byte.
//! - low nibble: literal count (0-15) for normal chunks, or the position of
//!   the dirty bit counted from the MSB (0-7) for special chunks.

use oxiidx_core::{OxiIdxError, Result};

/// Largest run count a header can carry.
pub const MAX_RUNS: usize = (1 << 15) - 1;

/// Largest literal count a normal chunk can carry.
pub const MAX_LITERALS: usize = (1 << 4) - 1;

/// Largest run count stored inline in the header byte.
pub const MAX_INLINE_RUNS: usize = 6;

/// Largest run count stored in a single escape byte.
pub const MAX_SHORT_RUNS: usize = (1 << 7) - 1;

const ESCAPE: u8 = 0b111;
const SPECIAL_FLAG: u8 = 0b1_0000;
const LONG_RUN_FLAG: u8 = 0b1000_0000;

/// Tail of an encoded chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    /// `literals` verbatim bytes follow the header.
    Normal {
        /// Number of literal bytes.
        literals: usize,
    },
    /// One dirty byte, stored as the position of its set bit.
    Special {
        /// Bit position counted from the MSB.
        position: u8,
    },
}

/// A decoded chunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Number of zero bytes before the tail.
    pub runs: usize,
    /// What follows the runs.
    pub kind: ChunkKind,
    /// Header length in bytes (1, 2 or 3).
    pub len: usize,
}

/// A byte with exactly one bit set.
#[inline]
pub fn is_dirty(byte: u8) -> bool {
    byte.is_power_of_two()
}

/// Position of the single set bit of a dirty byte, counted from the MSB.
#[inline]
pub fn dirty_bit_position(byte: u8) -> u8 {
    debug_assert!(is_dirty(byte));
    byte.leading_zeros() as u8
}

/// Append a run-count header with the given low five bits.
pub fn encode_runs(runs: usize, end_header: u8, out: &mut Vec<u8>) -> Result<()> {
    debug_assert!(end_header < 0b10_0000);
    if runs <= MAX_INLINE_RUNS {
        out.push(((runs as u8) << 5) | end_header);
    } else if runs <= MAX_SHORT_RUNS {
        out.push((ESCAPE << 5) | end_header);
        out.push(runs as u8);
    } else if runs <= MAX_RUNS {
        out.push((ESCAPE << 5) | end_header);
        out.push(LONG_RUN_FLAG | (runs >> 8) as u8);
        out.push((runs & 0xFF) as u8);
    } else {
        return Err(OxiIdxError::RunCountOverflow {
            runs,
            max: MAX_RUNS,
        });
    }
    Ok(())
}

/// Append a special chunk: `runs` zero bytes followed by `dirty`.
pub fn encode_special_chunk(runs: usize, dirty: u8, out: &mut Vec<u8>) -> Result<()> {
    encode_runs(runs, SPECIAL_FLAG | dirty_bit_position(dirty), out)
}

/// Append a normal chunk: `runs` zero bytes followed by `literals`.
pub fn encode_normal_chunk(runs: usize, literals: &[u8], out: &mut Vec<u8>) -> Result<()> {
    if literals.len() > MAX_LITERALS {
        return Err(OxiIdxError::LiteralCountOverflow {
            count: literals.len(),
            max: MAX_LITERALS,
        });
    }
    encode_runs(runs, literals.len() as u8, out)?;
    out.extend_from_slice(literals);
    Ok(())
}

/// Parse the header starting at `offset`.
pub fn decode_header(bytes: &[u8], offset: usize) -> Result<ChunkHeader> {
    let byte_at = |i: usize| {
        bytes
            .get(i)
            .copied()
            .ok_or_else(|| OxiIdxError::unexpected_eof(i))
    };

    let head = byte_at(offset)?;
    let field = head >> 5;
    let (runs, len) = if field == ESCAPE {
        let first = byte_at(offset + 1)?;
        if first & LONG_RUN_FLAG != 0 {
            let second = byte_at(offset + 2)?;
            ((usize::from(first & !LONG_RUN_FLAG) << 8) | usize::from(second), 3)
        } else {
            (usize::from(first), 2)
        }
    } else {
        (usize::from(field), 1)
    };

    let low = head & 0x0F;
    let kind = if head & SPECIAL_FLAG != 0 {
        if low > 7 {
            return Err(OxiIdxError::corrupted(
                offset,
                format!("dirty bit position {low} out of range"),
            ));
        }
        ChunkKind::Special { position: low }
    } else {
        ChunkKind::Normal {
            literals: usize::from(low),
        }
    };

    Ok(ChunkHeader { runs, kind, len })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs_header(runs: usize) -> Vec<u8> {
        let mut out = Vec::new();
        encode_runs(runs, 0, &mut out).unwrap();
        out
    }

    #[test]
    fn test_inline_runs() {
        assert_eq!(runs_header(0), vec![0b000_0_0000]);
        assert_eq!(runs_header(6), vec![0b110_0_0000]);
    }

    #[test]
    fn test_escape_forms() {
        assert_eq!(runs_header(7), vec![0b111_0_0000, 7]);
        assert_eq!(runs_header(127), vec![0b111_0_0000, 127]);
        assert_eq!(runs_header(128), vec![0b111_0_0000, 0b1000_0000, 128]);
        assert_eq!(runs_header(MAX_RUNS), vec![0b111_0_0000, 0xFF, 0xFF]);
    }

    #[test]
    fn test_run_overflow_is_fatal() {
        let mut out = Vec::new();
        let err = encode_runs(MAX_RUNS + 1, 0, &mut out).unwrap_err();
        assert!(matches!(err, OxiIdxError::RunCountOverflow { runs: 32768, .. }));
    }

    #[test]
    fn test_literal_overflow_is_fatal() {
        let mut out = Vec::new();
        let err = encode_normal_chunk(0, &[1; 16], &mut out).unwrap_err();
        assert!(matches!(err, OxiIdxError::LiteralCountOverflow { count: 16, .. }));
    }

    #[test]
    fn test_dirty_bytes() {
        assert!(is_dirty(0b0000_0001));
        assert!(is_dirty(0b1000_0000));
        assert!(!is_dirty(0));
        assert!(!is_dirty(0b0000_0011));
        assert_eq!(dirty_bit_position(0b1000_0000), 0);
        assert_eq!(dirty_bit_position(0b0000_0100), 5);
    }

    #[test]
    fn test_special_chunk() {
        let mut out = Vec::new();
        encode_special_chunk(2, 0b0010_0000, &mut out).unwrap();
        assert_eq!(out, vec![0b010_1_0010]);
    }

    #[test]
    fn test_decode_headers() {
        for runs in [0, 6, 7, 127, 128, 1000, MAX_RUNS] {
            let mut out = Vec::new();
            encode_normal_chunk(runs, &[0xAB, 0xCD], &mut out).unwrap();
            let header = decode_header(&out, 0).unwrap();
            assert_eq!(header.runs, runs);
            assert_eq!(header.kind, ChunkKind::Normal { literals: 2 });
            assert_eq!(&out[header.len..], &[0xAB, 0xCD]);
        }

        let mut out = Vec::new();
        encode_special_chunk(300, 0b0000_0001, &mut out).unwrap();
        let header = decode_header(&out, 0).unwrap();
        assert_eq!(header.runs, 300);
        assert_eq!(header.kind, ChunkKind::Special { position: 7 });
    }

    #[test]
    fn test_decode_truncated() {
        assert!(matches!(
            decode_header(&[0b111_0_0000, 0x80], 0),
            Err(OxiIdxError::UnexpectedEof { offset: 2 })
        ));
        assert!(matches!(
            decode_header(&[0b000_1_1000], 0),
            Err(OxiIdxError::CorruptedData { .. })
        ));
    }
}
