//! Errors raised while decoding a parameter space.
//!
//! Every variant names the parameter path at which decoding stopped, so the
//! dispatch layer can log the precise cause while answering the client with a
//! uniform fault.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::metadata::KindHint;
use crate::schema::ScalarKind;

/// Failure to decode a parameter space against a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A field marked required had no value at or below its path.
    #[error("missing required parameter {path}")]
    MissingRequired {
        /// Path of the missing field.
        path: String,
    },

    /// A boolean was neither `true` nor `false`.
    #[error("invalid boolean for param {path}: {value:?}")]
    InvalidBool {
        /// Offending path.
        path: String,
        /// Raw wire text.
        value: String,
    },

    /// An integer failed to parse or was out of range for its width.
    #[error("invalid {kind} for param {path}: {value:?}: {source}")]
    InvalidInteger {
        /// Offending path.
        path: String,
        /// Target integer kind.
        kind: ScalarKind,
        /// Raw wire text.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: ParseIntError,
    },

    /// A float failed to parse.
    #[error("invalid {kind} for param {path}: {value:?}: {source}")]
    InvalidFloat {
        /// Offending path.
        path: String,
        /// Target float kind.
        kind: ScalarKind,
        /// Raw wire text.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: ParseFloatError,
    },

    /// A float overflowed the range of its width.
    #[error("{kind} out of range for param {path}: {value:?}")]
    FloatOutOfRange {
        /// Offending path.
        path: String,
        /// Target float kind.
        kind: ScalarKind,
        /// Raw wire text.
        value: String,
    },

    /// Bytes were not valid standard base64.
    #[error("invalid base64 for param {path}: {message}")]
    InvalidBase64 {
        /// Offending path.
        path: String,
        /// Decoder diagnostic.
        message: String,
    },

    /// Fixed-length bytes decoded to the wrong number of bytes.
    #[error("length of array does not match for param {path} ({expected} != {actual})")]
    FixedLengthMismatch {
        /// Offending path.
        path: String,
        /// Declared length.
        expected: usize,
        /// Decoded length.
        actual: usize,
    },

    /// A timestamp did not match `YYYY-MM-DDThh:mm:ssZ`.
    #[error("invalid timestamp for param {path}: {value:?}: {message}")]
    InvalidTimestamp {
        /// Offending path.
        path: String,
        /// Raw wire text.
        value: String,
        /// Parser diagnostic.
        message: String,
    },

    /// The schema asked for a kind with no coercion rule.
    #[error("unsupported value for param {path} ({kind})")]
    UnsupportedKind {
        /// Offending path.
        path: String,
        /// Description of the unsupported kind.
        kind: String,
    },

    /// A kind hint named a shape the schema does not have.
    #[error("kind hint {hint} does not fit {actual} schema at param {path}")]
    KindMismatch {
        /// Offending path.
        path: String,
        /// Requested kind.
        hint: KindHint,
        /// Shape of the schema.
        actual: KindHint,
    },
}

impl DecodeError {
    /// Path of the parameter at which decoding failed.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::MissingRequired { path }
            | Self::InvalidBool { path, .. }
            | Self::InvalidInteger { path, .. }
            | Self::InvalidFloat { path, .. }
            | Self::FloatOutOfRange { path, .. }
            | Self::InvalidBase64 { path, .. }
            | Self::FixedLengthMismatch { path, .. }
            | Self::InvalidTimestamp { path, .. }
            | Self::UnsupportedKind { path, .. }
            | Self::KindMismatch { path, .. } => path.as_str(),
        }
    }
}
