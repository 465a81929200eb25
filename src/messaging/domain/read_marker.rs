//! Per-user read position within a conversation.

use super::{ConversationId, SequenceNumber};
use crate::directory::domain::UserId;
use serde::{Deserialize, Serialize};

/// How far a participant has read.
///
/// A marker only moves forward and never passes the conversation's last
/// sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadMarker {
    conversation_id: ConversationId,
    user_id: UserId,
    last_read: SequenceNumber,
}

impl ReadMarker {
    /// Creates a marker at `last_read`.
    #[must_use]
    pub const fn new(
        conversation_id: ConversationId,
        user_id: UserId,
        last_read: SequenceNumber,
    ) -> Self {
        Self {
            conversation_id,
            user_id,
            last_read,
        }
    }

    /// Creates a marker that has read nothing.
    #[must_use]
    pub const fn unread(conversation_id: ConversationId, user_id: UserId) -> Self {
        Self::new(conversation_id, user_id, SequenceNumber::ZERO)
    }

    /// Returns the conversation.
    #[must_use]
    pub const fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }

    /// Returns the reader.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the last sequence read.
    #[must_use]
    pub const fn last_read(&self) -> SequenceNumber {
        self.last_read
    }

    /// Moves the marker to `target`, clamped to `last_sequence`.
    ///
    /// Returns `false` when the marker stays where it was because the
    /// clamped target is not ahead of it.
    pub fn advance_to(&mut self, target: SequenceNumber, last_sequence: SequenceNumber) -> bool {
        let clamped = target.min(last_sequence);
        if clamped <= self.last_read {
            return false;
        }
        self.last_read = clamped;
        true
    }

    /// Counts messages after the marker.
    #[must_use]
    pub const fn unread_count(&self, last_sequence: SequenceNumber) -> u64 {
        last_sequence.distance_from(self.last_read)
    }
}
