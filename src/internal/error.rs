use thiserror::Error;
use std::fmt;
use std::io;

/// Whether a call demanded an exact buffer or tolerated trailing bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Remaining bytes must equal the layout size.
    Exact,
    /// Remaining bytes must be at least the layout size.
    AtLeast,
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strictness::Exact => write!(f, "exactly"),
            Strictness::AtLeast => write!(f, "at least"),
        }
    }
}

/// Unified error type for the fixlayout library.
#[derive(Error, Debug)]
pub enum Error {
    /// The declared schema of a structure cannot be turned into a layout.
    #[error("Schema Error: {type_name}: {reason}")]
    SchemaError {
        type_name: &'static str,
        reason: String,
    },

    /// The cursor does not hold the number of bytes the layout requires.
    #[error("Buffer Size Mismatch: {type_name} needs {strictness} {expected} bytes, {available} remaining")]
    BufferSizeMismatch {
        type_name: &'static str,
        expected: usize,
        available: usize,
        strictness: Strictness,
    },

    /// An array-valued field no longer has its declared length.
    #[error("Invalid Array Length: {type_name}.{field} should hold {expected} elements, found {found}")]
    InvalidArrayLength {
        type_name: &'static str,
        field: &'static str,
        expected: usize,
        found: usize,
    },

    /// The field traversal moved the cursor by something other than the layout size.
    #[error("Consumed Mismatch: {type_name} expected to use {expected} bytes, but {consumed} were used")]
    ConsumedMismatch {
        type_name: &'static str,
        expected: usize,
        consumed: usize,
    },

    /// Error related to data encoding/decoding.
    #[error("Codec Error: {0}")]
    CodecError(String),
}

impl Error {
    pub(crate) fn schema(type_name: &'static str, reason: impl Into<String>) -> Self {
        Error::SchemaError { type_name, reason: reason.into() }
    }
}

/// A specialized `Result` type for fixlayout operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::CodecError(format!("IO Error during codec operation: {}", err))
    }
}
