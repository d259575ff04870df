//! # OxiIdx Core
//!
//! Core components for the OxiIdx bitmap index codecs.
//!
//! This crate provides the building blocks shared by every codec:
//!
//! - [`bitmap`]: Packed bitmaps and fixed-width chunk scanning
//! - [`encoded`]: Encoded unit buffers and their bit-string wire form
//! - [`word`]: Word sizes and single-path fixed-width arithmetic
//! - [`trace`]: Step recorders for encoder visualization
//! - [`traits`]: The [`BitmapCodec`] trait
//! - [`table`]: Column bitmaps from fixture tables
//! - [`diff`]: Comparing encoded bit strings
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Dispatch: oxiidx CLI (codec selection, fixtures, diff)  │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codecs: BBC (bytes) │ WAH (words) │ VAL (segments)      │
//! ├─────────────────────────────────────────────────────────┤
//! │ Core (this crate): Bitmap, chunks, words, traces        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxiidx_core::{Bitmap, EncodedBitmap};
//!
//! let bitmap: Bitmap = "10100011111111".parse().unwrap();
//! let chunks: Vec<_> = bitmap.chunks(7).collect();
//! assert_eq!(chunks[0].value(), 0b1010001);
//! assert!(chunks[1].is_all_ones());
//!
//! let encoded = EncodedBitmap::from_units(8, vec![0b0101_0001, 0b1100_0001]);
//! assert_eq!(encoded.to_bit_string(), "0101000111000001");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitmap;
pub mod diff;
pub mod encoded;
pub mod error;
pub mod table;
pub mod trace;
pub mod traits;
pub mod word;

// Re-exports for convenience
pub use bitmap::{Bitmap, Chunk, Chunks};
pub use encoded::EncodedBitmap;
pub use error::{OxiIdxError, Result};
pub use trace::{NoTrace, RunType, StepRecorder};
pub use traits::{BitmapCodec, finish_decoded};
pub use word::{WordSize, low_mask, word_to_string};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitmap::{Bitmap, Chunk};
    pub use crate::encoded::EncodedBitmap;
    pub use crate::error::{OxiIdxError, Result};
    pub use crate::trace::{NoTrace, RunType, StepRecorder};
    pub use crate::traits::BitmapCodec;
    pub use crate::word::WordSize;
}
