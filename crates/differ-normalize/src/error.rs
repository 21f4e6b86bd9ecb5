//! Error types for the normalization adapter.

use std::fmt;

/// Errors that can occur while normalizing input into a `Value`.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// The input contains something the value model cannot represent.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// A `Serialize` implementation reported its own error.
    #[error("serialization error: {0}")]
    Custom(String),

    /// The input was a JSON document that failed to parse.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

impl NormalizeError {
    pub(crate) fn unsupported(what: impl fmt::Display) -> Self {
        Self::UnsupportedType(what.to_string())
    }
}

impl serde::ser::Error for NormalizeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}

/// Convenience alias for normalization results.
pub type NormalizeResult<T> = Result<T, NormalizeError>;
