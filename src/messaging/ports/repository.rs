//! Repository port for conversations, messages and read markers.

use crate::directory::domain::{ClientId, UserId};
use crate::messaging::domain::{
    Conversation, ConversationId, Message, MessageBody, MessagingDomainError, ReadMarker,
    SequenceNumber,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for messaging repository operations.
pub type MessagingRepositoryResult<T> = Result<T, MessagingRepositoryError>;

/// A message waiting for its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    /// Target conversation.
    pub conversation_id: ConversationId,
    /// Author.
    pub sender: UserId,
    /// Validated text.
    pub body: MessageBody,
    /// Posting time.
    pub sent_at: DateTime<Utc>,
}

/// Persistence contract for the messaging context.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - sequence numbers within a conversation start at 1 and never repeat, even
///   under concurrent appends;
/// - appending a message also advances the sender's read marker in the same
///   atomic step;
/// - read markers never move backwards.
#[async_trait]
pub trait MessagingRepository: Send + Sync {
    /// Stores a new conversation.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingRepositoryError::DuplicateConversation`] when the
    /// identifier already exists.
    async fn store_conversation(
        &self,
        conversation: &Conversation,
    ) -> MessagingRepositoryResult<()>;

    /// Adds `user_id`, belonging to `tenant`, to a stored conversation and
    /// returns the stored conversation with whether the user was new.
    ///
    /// The tenant rule and `max_participants` are checked against the stored
    /// participant list in the same atomic step as the insert. A newcomer's
    /// read marker starts at the current last sequence.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingRepositoryError::ConversationNotFound`] when the
    /// conversation does not exist and [`MessagingRepositoryError::Rejected`]
    /// when the addition would break a conversation rule.
    async fn add_participant(
        &self,
        conversation_id: ConversationId,
        user_id: UserId,
        tenant: Option<ClientId>,
        max_participants: usize,
    ) -> MessagingRepositoryResult<(Conversation, bool)>;

    /// Finds a conversation by identifier.
    async fn find_conversation(
        &self,
        id: ConversationId,
    ) -> MessagingRepositoryResult<Option<Conversation>>;

    /// Returns the conversations `user_id` participates in.
    async fn conversations_for(
        &self,
        user_id: UserId,
    ) -> MessagingRepositoryResult<Vec<Conversation>>;

    /// Returns every conversation.
    async fn list_conversations(&self) -> MessagingRepositoryResult<Vec<Conversation>>;

    /// Assigns the next sequence number, stores the message and marks it read
    /// for its sender.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingRepositoryError::ConversationNotFound`] when the
    /// conversation does not exist.
    async fn append_message(&self, draft: MessageDraft) -> MessagingRepositoryResult<Message>;

    /// Returns up to `limit` messages with a sequence greater than `after`,
    /// in sequence order.
    async fn messages_after(
        &self,
        conversation_id: ConversationId,
        after: SequenceNumber,
        limit: usize,
    ) -> MessagingRepositoryResult<Vec<Message>>;

    /// Returns the latest message of a conversation.
    async fn last_message(
        &self,
        conversation_id: ConversationId,
    ) -> MessagingRepositoryResult<Option<Message>>;

    /// Returns the user's marker, or an unread marker when none is stored.
    async fn read_marker(
        &self,
        conversation_id: ConversationId,
        user_id: UserId,
    ) -> MessagingRepositoryResult<ReadMarker>;

    /// Advances the user's marker to `up_to`, or to the last sequence when
    /// `None`, and returns the resulting marker.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingRepositoryError::ConversationNotFound`] when the
    /// conversation does not exist.
    async fn advance_marker(
        &self,
        conversation_id: ConversationId,
        user_id: UserId,
        up_to: Option<SequenceNumber>,
    ) -> MessagingRepositoryResult<ReadMarker>;
}

/// Errors returned by messaging repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MessagingRepositoryError {
    /// A conversation with this identifier already exists.
    #[error("duplicate conversation identifier: {0}")]
    DuplicateConversation(ConversationId),

    /// The conversation was not found.
    #[error("conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    /// The change would break a conversation rule.
    #[error(transparent)]
    Rejected(#[from] MessagingDomainError),

    /// Persistence failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MessagingRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
