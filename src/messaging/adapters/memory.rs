//! In-memory messaging repository.
//!
//! A single lock guards conversations, messages and markers together so that
//! sequence assignment and the sender's marker update are one atomic step.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::directory::domain::{ClientId, UserId};
use crate::messaging::{
    domain::{Conversation, ConversationId, Message, ReadMarker, SequenceNumber},
    ports::{
        MessageDraft, MessagingRepository, MessagingRepositoryError, MessagingRepositoryResult,
    },
};

/// Thread-safe in-memory store for the messaging context.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessagingRepository {
    state: Arc<RwLock<MessagingState>>,
}

#[derive(Debug, Default)]
struct MessagingState {
    conversations: HashMap<ConversationId, Conversation>,
    messages: HashMap<ConversationId, Vec<Message>>,
    markers: HashMap<(ConversationId, UserId), ReadMarker>,
}

impl MessagingState {
    fn conversation_mut(
        &mut self,
        id: ConversationId,
    ) -> MessagingRepositoryResult<&mut Conversation> {
        self.conversations
            .get_mut(&id)
            .ok_or(MessagingRepositoryError::ConversationNotFound(id))
    }

    fn marker(&self, conversation_id: ConversationId, user_id: UserId) -> ReadMarker {
        self.markers
            .get(&(conversation_id, user_id))
            .copied()
            .unwrap_or_else(|| ReadMarker::unread(conversation_id, user_id))
    }

    fn advance(
        &mut self,
        conversation_id: ConversationId,
        user_id: UserId,
        target: SequenceNumber,
        last_sequence: SequenceNumber,
    ) -> ReadMarker {
        let mut marker = self.marker(conversation_id, user_id);
        if marker.advance_to(target, last_sequence) {
            self.markers.insert((conversation_id, user_id), marker);
        }
        marker
    }
}

impl InMemoryMessagingRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> MessagingRepositoryResult<RwLockReadGuard<'_, MessagingState>> {
        self.state.read().map_err(|err| {
            MessagingRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> MessagingRepositoryResult<RwLockWriteGuard<'_, MessagingState>> {
        self.state.write().map_err(|err| {
            MessagingRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl MessagingRepository for InMemoryMessagingRepository {
    async fn store_conversation(
        &self,
        conversation: &Conversation,
    ) -> MessagingRepositoryResult<()> {
        let mut state = self.write()?;
        if state.conversations.contains_key(&conversation.id()) {
            return Err(MessagingRepositoryError::DuplicateConversation(
                conversation.id(),
            ));
        }
        state
            .conversations
            .insert(conversation.id(), conversation.clone());
        Ok(())
    }

    async fn add_participant(
        &self,
        conversation_id: ConversationId,
        user_id: UserId,
        tenant: Option<ClientId>,
        max_participants: usize,
    ) -> MessagingRepositoryResult<(Conversation, bool)> {
        let mut state = self.write()?;
        let stored = state.conversation_mut(conversation_id)?;
        let added = stored.add_participant(user_id, tenant, max_participants)?;
        let last_sequence = stored.last_sequence();
        let updated = stored.clone();
        if added {
            state.advance(conversation_id, user_id, last_sequence, last_sequence);
        }
        Ok((updated, added))
    }

    async fn find_conversation(
        &self,
        id: ConversationId,
    ) -> MessagingRepositoryResult<Option<Conversation>> {
        Ok(self.read()?.conversations.get(&id).cloned())
    }

    async fn conversations_for(
        &self,
        user_id: UserId,
    ) -> MessagingRepositoryResult<Vec<Conversation>> {
        let state = self.read()?;
        Ok(state
            .conversations
            .values()
            .filter(|conversation| conversation.is_participant(user_id))
            .cloned()
            .collect())
    }

    async fn list_conversations(&self) -> MessagingRepositoryResult<Vec<Conversation>> {
        Ok(self.read()?.conversations.values().cloned().collect())
    }

    async fn append_message(&self, draft: MessageDraft) -> MessagingRepositoryResult<Message> {
        let mut state = self.write()?;
        let MessageDraft {
            conversation_id,
            sender,
            body,
            sent_at,
        } = draft;
        let sequence = state
            .conversation_mut(conversation_id)?
            .record_message(sent_at);
        let message = Message::new(conversation_id, sender, body, sequence, sent_at);
        state
            .messages
            .entry(conversation_id)
            .or_default()
            .push(message.clone());
        state.advance(conversation_id, sender, sequence, sequence);
        Ok(message)
    }

    async fn messages_after(
        &self,
        conversation_id: ConversationId,
        after: SequenceNumber,
        limit: usize,
    ) -> MessagingRepositoryResult<Vec<Message>> {
        let state = self.read()?;
        Ok(state
            .messages
            .get(&conversation_id)
            .map(|messages| {
                messages
                    .iter()
                    .filter(|message| message.sequence() > after)
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn last_message(
        &self,
        conversation_id: ConversationId,
    ) -> MessagingRepositoryResult<Option<Message>> {
        let state = self.read()?;
        Ok(state
            .messages
            .get(&conversation_id)
            .and_then(|messages| messages.last())
            .cloned())
    }

    async fn read_marker(
        &self,
        conversation_id: ConversationId,
        user_id: UserId,
    ) -> MessagingRepositoryResult<ReadMarker> {
        Ok(self.read()?.marker(conversation_id, user_id))
    }

    async fn advance_marker(
        &self,
        conversation_id: ConversationId,
        user_id: UserId,
        up_to: Option<SequenceNumber>,
    ) -> MessagingRepositoryResult<ReadMarker> {
        let mut state = self.write()?;
        let last_sequence = state.conversation_mut(conversation_id)?.last_sequence();
        let target = up_to.unwrap_or(last_sequence);
        Ok(state.advance(conversation_id, user_id, target, last_sequence))
    }
}
