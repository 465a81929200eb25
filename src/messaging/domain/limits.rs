//! Size limits applied to conversations and messages.

use serde::{Deserialize, Serialize};

/// Configurable messaging limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagingLimits {
    /// Largest accepted message body, in bytes after trimming.
    pub max_body_bytes: usize,
    /// Most participants a conversation may hold.
    pub max_participants: usize,
    /// Longest accepted subject, in characters.
    pub max_subject_chars: usize,
}

impl Default for MessagingLimits {
    fn default() -> Self {
        Self {
            max_body_bytes: 8192,
            max_participants: 32,
            max_subject_chars: 200,
        }
    }
}
