//! Formatter error types.
//!
//! None of these reach callers of `format` or `inspect`; they exist for the
//! lower-level entry points such as [`crate::json_stringify`].

/// Errors raised while serializing a value.
#[derive(Debug)]
pub enum FormatError {
    /// The value refers back to itself.
    Circular,
    /// JSON encoding failed.
    Json(serde_json::Error),
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::Circular => write!(f, "Converting circular structure to JSON"),
            FormatError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Json(e) => Some(e),
            FormatError::Circular => None,
        }
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError::Json(err)
    }
}

/// Result alias for formatter operations.
pub type FormatResult<T> = Result<T, FormatError>;
