//! Error types for session verification and access control.

use thiserror::Error;

/// Reasons a session token is rejected.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The token is not `payload.signature` or a segment fails to decode.
    #[error("malformed session token")]
    Malformed,
    /// The signature does not match the payload.
    #[error("session signature mismatch")]
    BadSignature,
    /// The token is past its expiry.
    #[error("session expired")]
    Expired,
}

/// An authenticated actor attempted something its role does not permit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("access denied: {0}")]
pub struct AccessDenied(pub String);

impl AccessDenied {
    /// Creates a denial with a short reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}
