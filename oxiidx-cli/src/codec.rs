//! Codec selection from command-line flags.

use clap::{Args, ValueEnum};
use oxiidx_bbc::Bbc;
use oxiidx_core::{Bitmap, BitmapCodec, EncodedBitmap};
use oxiidx_val::Val;
use oxiidx_wah::Wah;
use serde::Serialize;
use std::fmt;

/// Compression algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Byte-aligned Bitmap Code
    Bbc,
    /// Word-Aligned Hybrid
    Wah,
    /// Variable-length Aligned Lists
    Val,
}

/// Word layout flags shared by every codec command.
#[derive(Debug, Clone, Copy, Args)]
pub struct LayoutArgs {
    /// Word size in bits for WAH and VAL (8, 16, 32, 64)
    #[arg(short = 'w', long = "word-size", default_value_t = 32)]
    pub word_size: u32,

    /// Segments per word for VAL
    #[arg(short = 's', long = "segments", default_value_t = 2)]
    pub segments: u32,
}

impl Default for LayoutArgs {
    fn default() -> Self {
        Self {
            word_size: 32,
            segments: 2,
        }
    }
}

/// A configured codec.
#[derive(Debug, Clone, Copy)]
pub enum Codec {
    Bbc(Bbc),
    Wah(Wah),
    Val(Val),
}

impl Codec {
    /// Build and validate the codec. Layout flags the algorithm does not
    /// use are ignored.
    pub fn new(algorithm: Algorithm, layout: LayoutArgs) -> oxiidx_core::Result<Self> {
        Ok(match algorithm {
            Algorithm::Bbc => Self::Bbc(Bbc),
            Algorithm::Wah => Self::Wah(Wah::with_word_bits(layout.word_size)?),
            Algorithm::Val => Self::Val(Val::with_layout(layout.word_size, layout.segments)?),
        })
    }

    pub fn unit_bits(&self) -> u32 {
        match self {
            Self::Bbc(c) => c.unit_bits(),
            Self::Wah(c) => c.unit_bits(),
            Self::Val(c) => c.unit_bits(),
        }
    }

    pub fn compress(&self, bitmap: &Bitmap) -> oxiidx_core::Result<EncodedBitmap> {
        match self {
            Self::Bbc(c) => c.compress(bitmap),
            Self::Wah(c) => c.compress(bitmap),
            Self::Val(c) => c.compress(bitmap),
        }
    }

    /// Compress and return the step list as JSON.
    pub fn compress_traced(
        &self,
        bitmap: &Bitmap,
    ) -> Result<(EncodedBitmap, serde_json::Value), Box<dyn std::error::Error>> {
        match self {
            Self::Bbc(c) => traced(c, bitmap),
            Self::Wah(c) => traced(c, bitmap),
            Self::Val(c) => traced(c, bitmap),
        }
    }

    pub fn decompress(
        &self,
        encoded: &EncodedBitmap,
        original_len: usize,
    ) -> oxiidx_core::Result<Bitmap> {
        match self {
            Self::Bbc(c) => c.decompress(encoded, original_len),
            Self::Wah(c) => c.decompress(encoded, original_len),
            Self::Val(c) => c.decompress(encoded, original_len),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bbc(_) => write!(f, "BBC"),
            Self::Wah(c) => write!(f, "WAH ({})", c.config().word_size),
            Self::Val(c) => write!(
                f,
                "VAL ({}, {} segments of {} bits)",
                c.config().word_size(),
                c.config().segment_count(),
                c.config().scan_length()
            ),
        }
    }
}

fn traced<C>(
    codec: &C,
    bitmap: &Bitmap,
) -> Result<(EncodedBitmap, serde_json::Value), Box<dyn std::error::Error>>
where
    C: BitmapCodec,
    C::Step: Serialize,
{
    let (encoded, steps) = codec.compress_with_trace(bitmap)?;
    Ok((encoded, serde_json::to_value(&steps)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(word_size: u32, segments: u32) -> LayoutArgs {
        LayoutArgs {
            word_size,
            segments,
        }
    }

    #[test]
    fn test_layout_validated() {
        assert!(Codec::new(Algorithm::Wah, layout(12, 2)).is_err());
        assert!(Codec::new(Algorithm::Val, layout(16, 3)).is_err());
        // BBC ignores the layout.
        assert!(Codec::new(Algorithm::Bbc, layout(12, 3)).is_ok());
    }

    #[test]
    fn test_display() {
        let val = Codec::new(Algorithm::Val, layout(16, 2)).unwrap();
        assert_eq!(val.to_string(), "VAL (16-bit, 2 segments of 7 bits)");
        let wah = Codec::new(Algorithm::Wah, LayoutArgs::default()).unwrap();
        assert_eq!(wah.to_string(), "WAH (32-bit)");
    }

    #[test]
    fn test_traced_steps_are_json() {
        let codec = Codec::new(Algorithm::Wah, layout(8, 2)).unwrap();
        let bitmap: Bitmap = "11111111010001".parse().unwrap();
        let (encoded, steps) = codec.compress_traced(&bitmap).unwrap();
        assert_eq!(encoded.to_bit_string(), "1100000101010001");
        assert_eq!(steps.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_unit_bits() {
        let bbc = Codec::new(Algorithm::Bbc, LayoutArgs::default()).unwrap();
        assert_eq!(bbc.unit_bits(), 8);
        let val = Codec::new(Algorithm::Val, layout(64, 4)).unwrap();
        assert_eq!(val.unit_bits(), 64);
    }
}
