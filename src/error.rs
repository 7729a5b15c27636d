//! Error types for the 8b/10b codec.

use thiserror::Error;

/// Errors reported by table construction, configuration and lane plumbing.
///
/// Invalid codewords are not errors: the decoder flags them through
/// [`Decoded::invalid`](crate::Decoded::invalid) and keeps going.
#[derive(Debug, Error)]
pub enum Error {
    /// A lookup table row would be assigned twice.
    #[error("lookup table {table}: row {row:#b} already maps to {existing}, refusing {value}")]
    DuplicateTableRow {
        table: &'static str,
        row: usize,
        existing: u8,
        value: u8,
    },

    /// A multi-lane unit needs at least one lane.
    #[error("lane count must be at least 1, got {0}")]
    InvalidLaneCount(usize),

    /// A group's width does not match the configured lane count.
    #[error("expected a group of {expected} lanes, got {actual}")]
    LaneMismatch { expected: usize, actual: usize },

    /// A raw value has bits set above the 10-bit codeword.
    #[error("codeword {0:#x} does not fit in 10 bits")]
    CodewordOutOfRange(u16),

    /// A symbol name is not of the form `D.x.y` or `K.x.y`.
    #[error("invalid symbol name: {0:?}")]
    InvalidSymbolName(String),

    /// Malformed configuration text.
    #[error("invalid codec configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, Error>;
