//! Errors at the host boundary
//!
//! Resolving mentions cannot fail; only decoding a host request or encoding
//! the response can.

use std::str::Utf8Error;

#[derive(Debug, thiserror::Error)]
pub enum MentionsError {
    /// Host passed a null pointer
    #[error("null pointer passed for {0}")]
    NullPointer(&'static str),

    /// Request bytes are not UTF-8
    #[error("request is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),

    /// Request JSON does not match the expected shape
    #[error("invalid resolve request: {0}")]
    InvalidRequest(#[source] serde_json::Error),

    /// Response could not be serialized
    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MentionsError>;
