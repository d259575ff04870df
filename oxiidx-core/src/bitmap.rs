//! Bitmaps and fixed-width chunk scanning.
//!
//! A [`Bitmap`] is an owned bit sequence packed MSB-first into bytes. The
//! codecs never look at individual characters of the input string; they
//! regroup the bitmap into fixed-width [`Chunk`]s whose boundaries depend
//! only on position.
//!
//! # Ending chunks
//!
//! When the bitmap length is not a multiple of the chunk width, the final
//! chunk is short. Its value is left-aligned and zero padded, and it is
//! flagged as an *ending* chunk: it never counts as all-zeros or all-ones,
//! so a truncated tail can never be miscoded as a full run.
//!
//! # Example
//!
//! ```
//! use oxiidx_core::Bitmap;
//!
//! let bitmap: Bitmap = "1111111101".parse().unwrap();
//! let chunks: Vec<_> = bitmap.chunks(7).collect();
//! assert_eq!(chunks.len(), 2);
//! assert!(chunks[0].is_all_ones());
//! assert!(chunks[1].is_ending());
//! assert_eq!(chunks[1].value(), 0b1010000);
//! ```

use crate::error::{OxiIdxError, Result};
use crate::word::low_mask;
use std::fmt;
use std::str::FromStr;

/// An owned sequence of bits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bitmap {
    /// Bits packed MSB-first; unused tail bits are always zero.
    bytes: Vec<u8>,
    /// Number of valid bits.
    len: usize,
}

impl Bitmap {
    /// Create an empty bitmap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty bitmap with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Parse a string of `'0'`/`'1'` characters.
    pub fn from_bit_str(s: &str) -> Result<Self> {
        let mut bitmap = Self::with_capacity(s.len());
        for (position, c) in s.chars().enumerate() {
            match c {
                '0' => bitmap.push(false),
                '1' => bitmap.push(true),
                found => return Err(OxiIdxError::invalid_bit(position, found)),
            }
        }
        Ok(bitmap)
    }

    /// Build a bitmap from bytes, keeping only the first `len` bits.
    ///
    /// Returns [`OxiIdxError::LengthMismatch`] if `bytes` holds fewer than
    /// `len` bits.
    pub fn from_bytes(bytes: &[u8], len: usize) -> Result<Self> {
        let available = bytes.len() * 8;
        if len > available {
            return Err(OxiIdxError::length_mismatch(len, available));
        }
        let mut bitmap = Self {
            bytes: bytes[..len.div_ceil(8)].to_vec(),
            len,
        };
        bitmap.clear_tail();
        Ok(bitmap)
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the bitmap holds no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The packed bytes, MSB-first, zero padded to a whole byte.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "bit index {index} out of range");
        (self.bytes[index / 8] >> (7 - index % 8)) & 1 == 1
    }

    /// Append one bit.
    #[inline]
    pub fn push(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 0x80 >> offset;
            }
        }
        self.len += 1;
    }

    /// Append the low `width` bits of `value`, MSB first.
    pub fn push_bits(&mut self, value: u64, width: u32) {
        for shift in (0..width).rev() {
            self.push((value >> shift) & 1 == 1);
        }
    }

    /// Append `count` copies of the low `width` bits of `value`.
    pub fn push_repeated(&mut self, value: u64, width: u32, count: u64) {
        if value == 0 {
            // Zero runs only need the length to grow.
            let new_len = self.len + width as usize * count as usize;
            self.bytes.resize(new_len.div_ceil(8), 0);
            self.len = new_len;
            return;
        }
        for _ in 0..count {
            self.push_bits(value, width);
        }
    }

    /// Shorten the bitmap to `len` bits. No effect if already shorter.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        self.len = len;
        self.bytes.truncate(len.div_ceil(8));
        self.clear_tail();
    }

    /// Read `width` bits starting at `start` as a chunk.
    ///
    /// Bits past the end are treated as zero padding and the chunk is
    /// flagged as ending.
    pub fn chunk(&self, start: usize, width: u32) -> Chunk {
        debug_assert!(width > 0 && width <= 64);
        let len = (self.len.saturating_sub(start)).min(width as usize) as u32;
        let mut value = 0u64;
        for i in 0..len as usize {
            value = (value << 1) | u64::from(self.get(start + i));
        }
        if len < width {
            value <<= width - len;
        }
        Chunk {
            start,
            value,
            width,
            len,
        }
    }

    /// Iterate over consecutive `width`-bit chunks.
    ///
    /// # Panics
    ///
    /// Panics if `width` is 0 or greater than 64.
    pub fn chunks(&self, width: u32) -> Chunks<'_> {
        assert!(width > 0 && width <= 64, "chunk width {width} out of range");
        Chunks {
            bitmap: self,
            width,
            position: 0,
        }
    }

    /// Render as a string of `'0'`/`'1'` characters.
    pub fn to_bit_string(&self) -> String {
        let mut out = String::with_capacity(self.len);
        for i in 0..self.len {
            out.push(if self.get(i) { '1' } else { '0' });
        }
        out
    }

    fn clear_tail(&mut self) {
        let used = self.len % 8;
        if used != 0 {
            if let Some(last) = self.bytes.last_mut() {
                *last &= 0xFFu8 << (8 - used);
            }
        }
    }
}

impl FromStr for Bitmap {
    type Err = OxiIdxError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_bit_str(s)
    }
}

impl fmt::Display for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}

impl FromIterator<bool> for Bitmap {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bitmap = Self::new();
        for bit in iter {
            bitmap.push(bit);
        }
        bitmap
    }
}

/// A fixed-width group of input bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    start: usize,
    value: u64,
    width: u32,
    len: u32,
}

impl Chunk {
    /// Bit offset of the first bit in the source bitmap.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Chunk bits, left-aligned within `width` and zero padded.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Nominal chunk width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of real (non-padding) bits.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether the chunk holds no real bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether this is a short final chunk.
    pub fn is_ending(&self) -> bool {
        self.len < self.width
    }

    /// A full-width chunk of zeros.
    pub fn is_all_zeros(&self) -> bool {
        !self.is_ending() && self.value == 0
    }

    /// A full-width chunk of ones.
    pub fn is_all_ones(&self) -> bool {
        !self.is_ending() && self.value == low_mask(self.width)
    }

    /// Run classification: `Some(true)` for ones, `Some(false)` for zeros,
    /// `None` for a literal.
    pub fn run_bit(&self) -> Option<bool> {
        if self.is_all_ones() {
            Some(true)
        } else if self.is_all_zeros() {
            Some(false)
        } else {
            None
        }
    }
}

/// Iterator over the chunks of a bitmap. See [`Bitmap::chunks`].
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    bitmap: &'a Bitmap,
    width: u32,
    position: usize,
}

impl Iterator for Chunks<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.position >= self.bitmap.len() {
            return None;
        }
        let chunk = self.bitmap.chunk(self.position, self.width);
        self.position += self.width as usize;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .bitmap
            .len()
            .saturating_sub(self.position)
            .div_ceil(self.width as usize);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Chunks<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_render() {
        let bitmap = Bitmap::from_bit_str("1011001").unwrap();
        assert_eq!(bitmap.len(), 7);
        assert_eq!(bitmap.as_bytes(), &[0b1011_0010]);
        assert_eq!(bitmap.to_string(), "1011001");
    }

    #[test]
    fn test_parse_rejects_non_binary() {
        let err = Bitmap::from_bit_str("0102").unwrap_err();
        assert!(matches!(
            err,
            OxiIdxError::InvalidBit {
                position: 2,
                found: '2'
            }
        ));
    }

    #[test]
    fn test_empty() {
        let bitmap: Bitmap = "".parse().unwrap();
        assert!(bitmap.is_empty());
        assert_eq!(bitmap.chunks(7).count(), 0);
    }

    #[test]
    fn test_chunk_classification() {
        let bitmap: Bitmap = "00000001111111101000111".parse().unwrap();
        let chunks: Vec<_> = bitmap.chunks(7).collect();
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].run_bit(), Some(false));
        assert_eq!(chunks[1].run_bit(), Some(true));
        assert_eq!(chunks[2].run_bit(), None);
        assert_eq!(chunks[2].value(), 0b1010001);
        assert_eq!(chunks[3].start(), 21);
        assert!(chunks[3].is_ending());
        assert_eq!(chunks[3].len(), 2);
    }

    #[test]
    fn test_ending_chunk_never_a_run() {
        let ones: Bitmap = "111".parse().unwrap();
        let chunk = ones.chunks(7).next().unwrap();
        assert_eq!(chunk.value(), 0b1110000);
        assert_eq!(chunk.run_bit(), None);

        let zeros: Bitmap = "000".parse().unwrap();
        assert_eq!(zeros.chunks(7).next().unwrap().run_bit(), None);
    }

    #[test]
    fn test_wide_chunks() {
        let bitmap: Bitmap = "1".repeat(63).parse().unwrap();
        let chunk = bitmap.chunks(63).next().unwrap();
        assert!(chunk.is_all_ones());
        assert_eq!(chunk.value(), u64::MAX >> 1);
    }

    #[test]
    fn test_push_repeated_and_truncate() {
        let mut bitmap = Bitmap::new();
        bitmap.push_bits(0b101, 3);
        bitmap.push_repeated(0, 7, 2);
        bitmap.push_repeated(0b11, 2, 2);
        assert_eq!(bitmap.to_string(), "101000000000000001111");

        bitmap.truncate(4);
        assert_eq!(bitmap.to_string(), "1010");
        assert_eq!(bitmap.as_bytes(), &[0b1010_0000]);
    }

    #[test]
    fn test_from_bytes() {
        let bitmap = Bitmap::from_bytes(&[0xFF, 0x80], 9).unwrap();
        assert_eq!(bitmap.to_string(), "111111111");
        assert!(Bitmap::from_bytes(&[0xFF], 9).is_err());
    }

    #[test]
    fn test_size_hint() {
        let bitmap: Bitmap = "0".repeat(15).parse().unwrap();
        assert_eq!(bitmap.chunks(7).len(), 3);
        assert_eq!(bitmap.chunks(8).len(), 2);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_chunks_reassemble(bits in "[01]{0,300}", width in 1u32..=64) {
                let bitmap: Bitmap = bits.parse().unwrap();
                let mut rebuilt = Bitmap::new();
                for chunk in bitmap.chunks(width) {
                    prop_assert_eq!(chunk.start(), rebuilt.len());
                    rebuilt.push_bits(chunk.value() >> (width - chunk.len()), chunk.len());
                }
                prop_assert_eq!(rebuilt, bitmap);
            }

            #[test]
            fn prop_only_last_chunk_ends(bits in "[01]{1,300}", width in 1u32..=64) {
                let bitmap: Bitmap = bits.parse().unwrap();
                let chunks: Vec<_> = bitmap.chunks(width).collect();
                let last = chunks.len() - 1;
                for (i, chunk) in chunks.iter().enumerate() {
                    prop_assert!(i == last || !chunk.is_ending());
                }
                prop_assert_eq!(chunks[last].is_ending(), bits.len() % width as usize != 0);
            }
        }
    }
}
