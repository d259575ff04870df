//! Encoded output buffers and their bit-string wire form.
//!
//! All codecs emit fixed-width units: bytes for BBC, words for WAH and VAL.
//! The wire form used for fixtures and display renders every unit as a
//! zero-padded binary string of its width, concatenated in emission order.

use crate::error::{OxiIdxError, Result};
use crate::word::{low_mask, push_bits};
use std::fmt;

/// A sequence of encoded units of one fixed width.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedBitmap {
    units: Vec<u64>,
    unit_bits: u32,
}

impl EncodedBitmap {
    /// Create an empty buffer sized for `capacity` units of `unit_bits` bits.
    pub fn with_capacity(unit_bits: u32, capacity: usize) -> Self {
        debug_assert!(unit_bits > 0 && unit_bits <= 64);
        Self {
            units: Vec::with_capacity(capacity),
            unit_bits,
        }
    }

    /// Wrap already-encoded units. Values are masked to `unit_bits`.
    pub fn from_units(unit_bits: u32, units: Vec<u64>) -> Self {
        let mask = low_mask(unit_bits);
        Self {
            units: units.into_iter().map(|u| u & mask).collect(),
            unit_bits,
        }
    }

    /// Wrap a byte-oriented encoding.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            units: bytes.iter().map(|&b| u64::from(b)).collect(),
            unit_bits: 8,
        }
    }

    /// Parse the wire form: a bit string whose length is a multiple of
    /// `unit_bits`.
    pub fn from_bit_str(s: &str, unit_bits: u32) -> Result<Self> {
        let width = unit_bits as usize;
        if s.len() % width != 0 {
            return Err(OxiIdxError::MisalignedEncoding {
                len: s.len(),
                word_bits: unit_bits,
            });
        }
        let mut units = Vec::with_capacity(s.len() / width);
        let mut value = 0u64;
        for (position, c) in s.chars().enumerate() {
            let bit = match c {
                '0' => 0,
                '1' => 1,
                found => return Err(OxiIdxError::invalid_bit(position, found)),
            };
            value = (value << 1) | bit;
            if (position + 1) % width == 0 {
                units.push(value);
                value = 0;
            }
        }
        Ok(Self { units, unit_bits })
    }

    /// Append one unit. The value is masked to the unit width.
    #[inline]
    pub fn push(&mut self, unit: u64) {
        self.units.push(unit & low_mask(self.unit_bits));
    }

    /// Width of one unit in bits.
    pub fn unit_bits(&self) -> u32 {
        self.unit_bits
    }

    /// The encoded units.
    pub fn units(&self) -> &[u64] {
        &self.units
    }

    /// Consume and return the encoded units.
    pub fn into_units(self) -> Vec<u64> {
        self.units
    }

    /// Number of encoded units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Total encoded size in bits.
    pub fn bit_len(&self) -> usize {
        self.units.len() * self.unit_bits as usize
    }

    /// Units as bytes. Only meaningful for 8-bit units.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.units.iter().map(|&u| u as u8).collect()
    }

    /// Render the wire form.
    pub fn to_bit_string(&self) -> String {
        let mut out = String::with_capacity(self.bit_len());
        for &unit in &self.units {
            push_bits(&mut out, unit, self.unit_bits);
        }
        out
    }

    /// Encoded size relative to `original_bits` (smaller is better).
    pub fn ratio(&self, original_bits: usize) -> f64 {
        if original_bits == 0 {
            return 0.0;
        }
        self.bit_len() as f64 / original_bits as f64
    }
}

impl fmt::Display for EncodedBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bit_string())
    }
}
