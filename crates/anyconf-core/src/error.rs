//! Error types for value extraction, map lookup, path resolution and manifest parsing.

use thiserror::Error;

use crate::value::Kind;

/// Errors raised by [`Value`](crate::Value), [`AnyMap`](crate::AnyMap) and the map iterators.
#[derive(Error, Debug)]
pub enum AnyError {
    /// A typed accessor asked for a kind other than the active one.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Kind, found: Kind },

    /// A required map lookup found no entry for the key.
    #[error("key not found: '{0}'")]
    KeyNotFound(String),

    /// A sequence index, after negative wraparound, is outside `0..len`.
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: i64, len: usize },

    /// A path segment addressing a sequence is not an integer.
    #[error("invalid sequence index '{0}'")]
    InvalidIndex(String),

    /// A dotted path continues past a value that is neither a map nor a sequence.
    #[error("unsupported value at '{segment}' for dotted lookup")]
    UnsupportedPathSegment { segment: String },

    /// An invalid or exhausted iterator was dereferenced or advanced.
    #[error("cannot dereference or advance an invalid iterator")]
    InvalidIterator,

    /// A strategy name did not match any known map strategy.
    #[error("invalid map strategy '{0}' (expected ordered, hashed or hashed-case-insensitive)")]
    InvalidStrategy(String),

    /// JSON `null` has no counterpart in the value model.
    #[error("null is not representable (at '{path}')")]
    UnsupportedNull { path: String },

    /// The input text was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Structural errors from the component manifest reader.
///
/// Any of these aborts the whole document.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("manifest is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required field '{field}'")]
    MissingField { field: String },

    #[error("field '{field}' must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("invalid value '{value}' for field '{field}' (expected one of: {})", .choices.join(", "))]
    InvalidChoice {
        field: String,
        value: String,
        choices: &'static [&'static str],
    },

    #[error("invalid array value for 'interfaces': expected non-empty string")]
    EmptyInterface,

    #[error(
        "duplicate service reference names found, reference names must be unique: {}",
        .0.join(" ")
    )]
    DuplicateReferences(Vec<String>),
}

/// Convenience alias used throughout anyconf-core.
pub type Result<T> = std::result::Result<T, AnyError>;
