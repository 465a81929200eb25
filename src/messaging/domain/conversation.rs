//! Conversation aggregate root.

use super::{ConversationId, MessagingDomainError, SequenceNumber, Subject};
use crate::directory::domain::{ClientId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A thread between a client's users and staff, or among staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    id: ConversationId,
    subject: Subject,
    client_id: Option<ClientId>,
    participants: BTreeSet<UserId>,
    created_by: UserId,
    created_at: DateTime<Utc>,
    last_message_at: Option<DateTime<Utc>>,
    last_sequence: SequenceNumber,
}

impl Conversation {
    /// Opens a conversation.
    ///
    /// The creator is always a participant and duplicates collapse.
    /// `client_id` is the single client tenant represented among the
    /// participants, if any.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingDomainError::TooFewParticipants`] when fewer than
    /// two distinct users remain, or
    /// [`MessagingDomainError::TooManyParticipants`] above `max_participants`.
    pub fn new(
        subject: Subject,
        created_by: UserId,
        invited: impl IntoIterator<Item = UserId>,
        client_id: Option<ClientId>,
        max_participants: usize,
        clock: &impl Clock,
    ) -> Result<Self, MessagingDomainError> {
        let mut participants: BTreeSet<UserId> = invited.into_iter().collect();
        participants.insert(created_by);
        if participants.len() < 2 {
            return Err(MessagingDomainError::TooFewParticipants);
        }
        if participants.len() > max_participants {
            return Err(MessagingDomainError::TooManyParticipants {
                max: max_participants,
            });
        }
        Ok(Self {
            id: ConversationId::new(),
            subject,
            client_id,
            participants,
            created_by,
            created_at: clock.utc(),
            last_message_at: None,
            last_sequence: SequenceNumber::ZERO,
        })
    }

    /// Returns the conversation identifier.
    #[must_use]
    pub const fn id(&self) -> ConversationId {
        self.id
    }

    /// Returns the subject.
    #[must_use]
    pub const fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Returns the client tenant represented in the conversation, if any.
    #[must_use]
    pub const fn client_id(&self) -> Option<ClientId> {
        self.client_id
    }

    /// Returns the participants in identifier order.
    #[must_use]
    pub const fn participants(&self) -> &BTreeSet<UserId> {
        &self.participants
    }

    /// Returns `true` if `user_id` takes part in the conversation.
    #[must_use]
    pub fn is_participant(&self, user_id: UserId) -> bool {
        self.participants.contains(&user_id)
    }

    /// Returns who opened the conversation.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the latest message was posted.
    #[must_use]
    pub const fn last_message_at(&self) -> Option<DateTime<Utc>> {
        self.last_message_at
    }

    /// Returns the latest message time, or the creation time when empty.
    #[must_use]
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_message_at.unwrap_or(self.created_at)
    }

    /// Returns the sequence of the latest message.
    #[must_use]
    pub const fn last_sequence(&self) -> SequenceNumber {
        self.last_sequence
    }

    /// Reserves the next sequence number for a message sent at `sent_at`.
    pub const fn record_message(&mut self, sent_at: DateTime<Utc>) -> SequenceNumber {
        self.last_sequence = self.last_sequence.next();
        self.last_message_at = Some(sent_at);
        self.last_sequence
    }

    /// Adds a participant. Returns `false` if already present.
    ///
    /// `tenant` is the newcomer's client, which becomes the conversation's
    /// tenant when none was set.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingDomainError::MixedTenants`] when `tenant` differs
    /// from the conversation's tenant, or
    /// [`MessagingDomainError::TooManyParticipants`] when full.
    pub fn add_participant(
        &mut self,
        user_id: UserId,
        tenant: Option<ClientId>,
        max_participants: usize,
    ) -> Result<bool, MessagingDomainError> {
        if self.is_participant(user_id) {
            return Ok(false);
        }
        if let (Some(current), Some(incoming)) = (self.client_id, tenant)
            && current != incoming
        {
            return Err(MessagingDomainError::MixedTenants);
        }
        if self.participants.len() >= max_participants {
            return Err(MessagingDomainError::TooManyParticipants {
                max: max_participants,
            });
        }
        if self.client_id.is_none() {
            self.client_id = tenant;
        }
        self.participants.insert(user_id);
        Ok(true)
    }
}
