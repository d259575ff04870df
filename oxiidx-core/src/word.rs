//! Fixed-width word helpers.
//!
//! Every word width is handled through a single `u64` path: values are
//! masked to the configured width, so 8, 16, 32 and 64-bit words share the
//! same arithmetic.

use crate::error::{OxiIdxError, Result};
use std::fmt;

/// Supported output word widths for the word-aligned codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WordSize {
    /// 8-bit words.
    W8,
    /// 16-bit words.
    W16,
    /// 32-bit words.
    W32,
    /// 64-bit words.
    W64,
}

impl WordSize {
    /// All supported word sizes, smallest first.
    pub const ALL: [WordSize; 4] = [WordSize::W8, WordSize::W16, WordSize::W32, WordSize::W64];

    /// Create a word size from a bit count.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(Self::W8),
            16 => Ok(Self::W16),
            32 => Ok(Self::W32),
            64 => Ok(Self::W64),
            other => Err(OxiIdxError::unsupported_word_size(other)),
        }
    }

    /// Width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W32 => 32,
            Self::W64 => 64,
        }
    }

    /// Mask covering the whole word.
    pub const fn mask(self) -> u64 {
        low_mask(self.bits())
    }
}

impl TryFrom<u32> for WordSize {
    type Error = OxiIdxError;

    fn try_from(bits: u32) -> Result<Self> {
        Self::from_bits(bits)
    }
}

impl fmt::Display for WordSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// Mask with the low `width` bits set. `width` may be 0 through 64.
#[inline]
pub const fn low_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Append `value` as exactly `width` binary digits, MSB first.
#[inline]
pub fn push_bits(out: &mut String, value: u64, width: u32) {
    for shift in (0..width).rev() {
        out.push(if (value >> shift) & 1 == 1 { '1' } else { '0' });
    }
}

/// Render `value` as a zero-padded binary string of `width` digits.
pub fn word_to_string(value: u64, width: u32) -> String {
    let mut out = String::with_capacity(width as usize);
    push_bits(&mut out, value, width);
    out
}
