//! Validated conversation subject and message body text.

use super::{MessagingDomainError, MessagingLimits};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of characters kept in a message preview.
pub const PREVIEW_CHARS: usize = 80;

/// Trimmed, non-empty conversation subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subject(String);

impl Subject {
    /// Validates a subject against `limits`.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingDomainError::EmptySubject`] or
    /// [`MessagingDomainError::SubjectTooLong`].
    pub fn new(value: &str, limits: &MessagingLimits) -> Result<Self, MessagingDomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(MessagingDomainError::EmptySubject);
        }
        if trimmed.chars().count() > limits.max_subject_chars {
            return Err(MessagingDomainError::SubjectTooLong {
                max: limits.max_subject_chars,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the subject text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed, non-empty message text within the size limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageBody(String);

impl MessageBody {
    /// Validates a body against `limits`.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingDomainError::EmptyBody`] or
    /// [`MessagingDomainError::BodyTooLarge`].
    pub fn new(value: &str, limits: &MessagingLimits) -> Result<Self, MessagingDomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(MessagingDomainError::EmptyBody);
        }
        if trimmed.len() > limits.max_body_bytes {
            return Err(MessagingDomainError::BodyTooLarge {
                max: limits.max_body_bytes,
                actual: trimmed.len(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the body text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first [`PREVIEW_CHARS`] characters, with an ellipsis when
    /// cut short.
    #[must_use]
    pub fn preview(&self) -> String {
        let mut chars = self.0.chars();
        let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
        if chars.next().is_some() {
            format!("{head}…")
        } else {
            head
        }
    }
}
