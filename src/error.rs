//! Error types for mesh entropy coding.
//!
//! This module provides the [`CodecError`] type. The arithmetic coder itself
//! never signals errors for bad probabilities: a zero `total` or a mismatched
//! `decode_target`/`consume` pair corrupts the stream silently. What *is*
//! reported is everything around the hot path.
//!
//! ## Error Categories
//!
//! | Category | Errors | Description |
//! |----------|--------|-------------|
//! | I/O | [`Io`] | The sink or source failed |
//! | Header | [`InvalidSignature`], [`UnsupportedVersion`], [`UnexpectedEof`], [`UnknownFieldType`], [`UnknownTarget`], [`VintOverflow`] | Malformed schema header |
//! | Schema | [`InvalidSchema`], [`FieldTypeMismatch`], [`RowLength`] | Values do not match the mesh schema |
//! | Alphabet | [`UnregisteredSymbol`], [`InvalidSymbol`] | Symbol outside a table's registered alphabet |
//!
//! ## Example
//!
//! ```rust,ignore
//! use harry::{CodecError, schema::header::read_schema};
//!
//! match read_schema(&bytes) {
//!     Ok((schema, used)) => println!("{} attribute lists, payload at {}", schema.lists.len(), used),
//!     Err(CodecError::InvalidSignature) => eprintln!("Not a Harry stream"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! [`Io`]: CodecError::Io
//! [`InvalidSignature`]: CodecError::InvalidSignature
//! [`UnsupportedVersion`]: CodecError::UnsupportedVersion
//! [`UnexpectedEof`]: CodecError::UnexpectedEof
//! [`UnknownFieldType`]: CodecError::UnknownFieldType
//! [`UnknownTarget`]: CodecError::UnknownTarget
//! [`VintOverflow`]: CodecError::VintOverflow
//! [`InvalidSchema`]: CodecError::InvalidSchema
//! [`FieldTypeMismatch`]: CodecError::FieldTypeMismatch
//! [`RowLength`]: CodecError::RowLength
//! [`UnregisteredSymbol`]: CodecError::UnregisteredSymbol
//! [`InvalidSymbol`]: CodecError::InvalidSymbol

use std::fmt;
use std::io;

use crate::models::FieldType;

/// Error type for coding sessions.
#[derive(Debug)]
pub enum CodecError {
    /// An I/O error occurred on the underlying sink or source.
    Io(io::Error),

    /// The schema header does not start with `HRY`.
    InvalidSignature,

    /// The schema header has a version this crate cannot read.
    UnsupportedVersion(u8),

    /// The schema header ended in the middle of a field.
    UnexpectedEof,

    /// A field type tag in the schema header is not a known [`FieldType`].
    UnknownFieldType(u8),

    /// An attribute target byte is neither vertex (0) nor corner (1).
    UnknownTarget(u8),

    /// A variable-length integer ran past 10 bytes or does not fit its slot.
    VintOverflow,

    /// The schema cannot be turned into models.
    ///
    /// The `String` names the offending entry, e.g. a face degree below 3.
    InvalidSchema(String),

    /// A value was handed to a field model of a different numeric type.
    FieldTypeMismatch {
        /// Type declared by the schema.
        expected: FieldType,
        /// Type of the value that was passed.
        found: FieldType,
    },

    /// An attribute row has the wrong number of fields.
    RowLength {
        /// Field count of the schema.
        expected: usize,
        /// Length of the row that was passed.
        found: usize,
    },

    /// A symbol was coded before it was registered in its table.
    ///
    /// Encoder and decoder must register symbols in identical order, so this
    /// always indicates a bug in the driving codec.
    UnregisteredSymbol(u32),

    /// A decoded table symbol does not map to an operation or encoding kind.
    InvalidSymbol(u32),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::InvalidSignature => write!(f, "Invalid stream signature"),
            Self::UnsupportedVersion(v) => write!(f, "Unsupported stream version: {}", v),
            Self::UnexpectedEof => write!(f, "Unexpected end of schema header"),
            Self::UnknownFieldType(t) => write!(f, "Unknown field type tag: {}", t),
            Self::UnknownTarget(t) => write!(f, "Unknown attribute target: {}", t),
            Self::VintOverflow => write!(f, "Variable-length integer overflow"),
            Self::InvalidSchema(msg) => write!(f, "Invalid schema: {}", msg),
            Self::FieldTypeMismatch { expected, found } => {
                write!(f, "Field type mismatch: expected {:?}, found {:?}", expected, found)
            }
            Self::RowLength { expected, found } => {
                write!(f, "Row has {} fields, schema has {}", found, expected)
            }
            Self::UnregisteredSymbol(s) => write!(f, "Symbol {} is not registered", s),
            Self::InvalidSymbol(s) => write!(f, "Decoded symbol {} has no meaning", s),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CodecError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_io_error_has_source() {
        let err = CodecError::from(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_display_row_length() {
        let err = CodecError::RowLength {
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "Row has 2 fields, schema has 3");
        assert!(err.source().is_none());
    }
}
