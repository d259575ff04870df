//! Error types for OxiIdx operations.
//!
//! A single error type covers configuration errors (raised before any
//! processing starts), header overflow in the byte-aligned codec, malformed
//! bit strings, and corrupted encodings seen while decoding.

use std::io;
use thiserror::Error;

/// The main error type for OxiIdx operations.
#[derive(Debug, Error)]
pub enum OxiIdxError {
    /// I/O error from reading fixture or input files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A bit string contained something other than `'0'` or `'1'`.
    #[error("Invalid bit {found:?} at position {position}: expected '0' or '1'")]
    InvalidBit {
        /// Character index of the offending character.
        position: usize,
        /// The character that was found.
        found: char,
    },

    /// Word size other than 8, 16, 32 or 64 bits.
    #[error("Unsupported word size: {bits} (choose 8, 16, 32, or 64)")]
    UnsupportedWordSize {
        /// The requested word size in bits.
        bits: u32,
    },

    /// Segment count that does not split the word evenly.
    #[error(
        "Invalid segment count {segment_count} for {word_size}-bit words: \
         (word size - segment count) must divide evenly by segment count"
    )]
    InvalidSegmentCount {
        /// Word size in bits.
        word_size: u32,
        /// The requested number of segments per word.
        segment_count: u32,
    },

    /// Segments too narrow to hold a run type bit and a count.
    #[error("Scan length {scan_length} is too small (must be at least 2 bits)")]
    ScanLengthTooSmall {
        /// The derived scan length in bits.
        scan_length: u32,
    },

    /// Run count does not fit the byte-aligned run header.
    #[error("Too many runs ({runs}) for a run header (max {max})")]
    RunCountOverflow {
        /// Number of runs that was requested.
        runs: usize,
        /// Largest encodable run count.
        max: usize,
    },

    /// Literal count does not fit the byte-aligned literal field.
    #[error("Too many literals ({count}) for a normal chunk (max {max})")]
    LiteralCountOverflow {
        /// Number of literals that was requested.
        count: usize,
        /// Largest encodable literal count.
        max: usize,
    },

    /// Corrupted encoded data.
    #[error("Corrupted data at unit {offset}: {message}")]
    CorruptedData {
        /// Index of the encoded byte or word where corruption was detected.
        offset: usize,
        /// Description of the corruption.
        message: String,
    },

    /// Encoded data ended in the middle of a unit.
    #[error("Unexpected end of encoded data at unit {offset}")]
    UnexpectedEof {
        /// Index of the encoded byte or word that was expected.
        offset: usize,
    },

    /// Decoded bitmap is shorter than the requested original length.
    #[error("Decoded {available} bits, but the original length is {expected}")]
    LengthMismatch {
        /// Requested original length in bits.
        expected: usize,
        /// Number of bits the encoding actually produced.
        available: usize,
    },

    /// Encoded bit string length is not a whole number of units.
    #[error("Encoded length {len} is not a multiple of the {word_bits}-bit unit width")]
    MisalignedEncoding {
        /// Length of the encoded bit string.
        len: usize,
        /// Width of one encoded unit.
        word_bits: u32,
    },

    /// A table row has a different width from the first row.
    #[error("Ragged table: row {row} has {found} columns, expected {expected}")]
    RaggedTable {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },

    /// A table without rows.
    #[error("Table has no rows")]
    EmptyTable,
}

/// Result type alias for OxiIdx operations.
pub type Result<T> = std::result::Result<T, OxiIdxError>;

impl OxiIdxError {
    /// Create an invalid bit error.
    pub fn invalid_bit(position: usize, found: char) -> Self {
        Self::InvalidBit { position, found }
    }

    /// Create an unsupported word size error.
    pub fn unsupported_word_size(bits: u32) -> Self {
        Self::UnsupportedWordSize { bits }
    }

    /// Create an invalid segment count error.
    pub fn invalid_segment_count(word_size: u32, segment_count: u32) -> Self {
        Self::InvalidSegmentCount {
            word_size,
            segment_count,
        }
    }

    /// Create a corrupted data error.
    pub fn corrupted(offset: usize, message: impl Into<String>) -> Self {
        Self::CorruptedData {
            offset,
            message: message.into(),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(offset: usize) -> Self {
        Self::UnexpectedEof { offset }
    }

    /// Create a length mismatch error.
    pub fn length_mismatch(expected: usize, available: usize) -> Self {
        Self::LengthMismatch {
            expected,
            available,
        }
    }

    /// Whether this error was raised by configuration validation.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedWordSize { .. }
                | Self::InvalidSegmentCount { .. }
                | Self::ScanLengthTooSmall { .. }
        )
    }
}
