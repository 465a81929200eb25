//! Error types for messaging domain validation.

use thiserror::Error;

/// Errors returned while building conversations and messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagingDomainError {
    /// The subject is blank after trimming.
    #[error("subject must not be empty")]
    EmptySubject,

    /// The subject exceeds the configured length.
    #[error("subject must be at most {max} characters")]
    SubjectTooLong {
        /// Maximum permitted characters.
        max: usize,
    },

    /// The message body is blank after trimming.
    #[error("message body must not be empty")]
    EmptyBody,

    /// The message body exceeds the configured size.
    #[error("message body is {actual} bytes, limit is {max}")]
    BodyTooLarge {
        /// Maximum permitted bytes.
        max: usize,
        /// Actual size in bytes.
        actual: usize,
    },

    /// A conversation needs someone to talk to.
    #[error("a conversation needs at least two participants")]
    TooFewParticipants,

    /// The participant cap was exceeded.
    #[error("a conversation allows at most {max} participants")]
    TooManyParticipants {
        /// Maximum permitted participants.
        max: usize,
    },

    /// Users of two client tenants would share a conversation.
    #[error("participants from different clients cannot share a conversation")]
    MixedTenants,
}
