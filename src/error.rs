//! Error types for bit-packing codecs.

use thiserror::Error;

/// Error variants for codec construction and access.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// An index was provided that is outside `[0, len)`.
    #[error("index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// The factory was asked for a layout it does not know.
    #[error("unknown packer kind: {0:?}")]
    UnknownKind(String),
}

/// A specialized Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
