//! Service layer for conversations, messages and read state.

use crate::auth::domain::{AccessDenied, AccessPolicy, Actor};
use crate::directory::{
    domain::{ClientId, User, UserId},
    ports::{DirectoryRepository, DirectoryRepositoryError},
};
use crate::messaging::{
    domain::{
        Conversation, ConversationId, Message, MessageBody, MessagingDomainError,
        MessagingLimits, ReadMarker, SequenceNumber, Subject,
    },
    ports::{MessageDraft, MessagingRepository, MessagingRepositoryError},
};
use crate::notification::{
    domain::{Notice, NotificationKind},
    ports::NotificationSink,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default page size for [`MessagingService::list_messages`].
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Largest page [`MessagingService::list_messages`] returns.
pub const MAX_PAGE_SIZE: usize = 200;

const UNKNOWN_SENDER: &str = "Someone";

/// Request payload for opening a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartConversationRequest {
    subject: String,
    participants: Vec<UserId>,
    opening_message: Option<String>,
}

impl StartConversationRequest {
    /// Creates a request inviting `participants`. The caller joins
    /// automatically.
    #[must_use]
    pub fn new(subject: impl Into<String>, participants: Vec<UserId>) -> Self {
        Self {
            subject: subject.into(),
            participants,
            opening_message: None,
        }
    }

    /// Posts `body` as the first message.
    #[must_use]
    pub fn with_opening_message(mut self, body: impl Into<String>) -> Self {
        self.opening_message = Some(body.into());
        self
    }
}

/// The latest message of a conversation, shortened for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessagePreview {
    /// Author.
    pub sender: UserId,
    /// Shortened body.
    pub text: String,
    /// Position of the message.
    pub sequence: SequenceNumber,
    /// Posting time.
    pub sent_at: DateTime<Utc>,
}

impl From<&Message> for MessagePreview {
    fn from(message: &Message) -> Self {
        Self {
            sender: message.sender(),
            text: message.body().preview(),
            sequence: message.sequence(),
            sent_at: message.sent_at(),
        }
    }
}

/// One row of a user's inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationSummary {
    /// The conversation.
    pub conversation: Conversation,
    /// Its latest message, if any.
    pub last_message: Option<MessagePreview>,
    /// Messages the user has not read.
    pub unread: u64,
}

/// Service-level errors for messaging operations.
#[derive(Debug, Error)]
pub enum MessagingServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] MessagingDomainError),
    /// Messaging repository operation failed.
    #[error(transparent)]
    Repository(#[from] MessagingRepositoryError),
    /// Directory lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryRepositoryError),
    /// The actor's role does not allow the operation.
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),
    /// The conversation does not exist or the actor is not in it.
    #[error("conversation not found: {0}")]
    ConversationNotFound(ConversationId),
    /// A participant is unknown or deactivated.
    #[error("user {0} cannot take part in conversations")]
    UnknownParticipant(UserId),
}

/// Result type for messaging service operations.
pub type MessagingServiceResult<T> = Result<T, MessagingServiceError>;

/// Messaging service.
#[derive(Clone)]
pub struct MessagingService<R, C>
where
    R: MessagingRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    directory: Arc<dyn DirectoryRepository>,
    notifier: Arc<dyn NotificationSink>,
    clock: Arc<C>,
    limits: MessagingLimits,
}

impl<R, C> MessagingService<R, C>
where
    R: MessagingRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new messaging service.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        directory: Arc<dyn DirectoryRepository>,
        notifier: Arc<dyn NotificationSink>,
        clock: Arc<C>,
        limits: MessagingLimits,
    ) -> Self {
        Self {
            repository,
            directory,
            notifier,
            clock,
            limits,
        }
    }

    /// Returns the configured limits.
    #[must_use]
    pub const fn limits(&self) -> &MessagingLimits {
        &self.limits
    }

    /// Opens a conversation and optionally posts its first message.
    ///
    /// Invited participants receive a conversation invite.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingServiceError::UnknownParticipant`] for a missing or
    /// deactivated user, and [`MessagingServiceError::Domain`] for a bad
    /// subject or body, a participant count outside the limits, or users of
    /// two client tenants.
    pub async fn start_conversation(
        &self,
        actor: &Actor,
        request: StartConversationRequest,
    ) -> MessagingServiceResult<(Conversation, Option<Message>)> {
        let StartConversationRequest {
            subject,
            participants,
            opening_message,
        } = request;
        let subject_line = Subject::new(&subject, &self.limits)?;
        let opening = opening_message
            .map(|text| MessageBody::new(&text, &self.limits))
            .transpose()?;

        let mut invited: BTreeSet<UserId> = participants.into_iter().collect();
        invited.insert(actor.user_id());
        if invited.len() > self.limits.max_participants {
            return Err(MessagingDomainError::TooManyParticipants {
                max: self.limits.max_participants,
            }
            .into());
        }
        let members = self.resolve_participants(&invited).await?;
        let tenant = single_tenant(&members)?;

        let conversation = Conversation::new(
            subject_line,
            actor.user_id(),
            invited,
            tenant,
            self.limits.max_participants,
            &*self.clock,
        )?;
        self.repository.store_conversation(&conversation).await?;
        info!(
            conversation_id = %conversation.id(),
            participants = conversation.participants().len(),
            "started conversation"
        );

        let inviter = display_name_of(&members, actor.user_id());
        let invite = invite_notice(&conversation, &inviter);
        for participant in conversation.participants() {
            if *participant != actor.user_id() {
                self.deliver(*participant, invite.clone()).await;
            }
        }

        let first = match opening {
            Some(body) => Some(self.append(actor, &conversation, body).await?),
            None => None,
        };
        let current = self.load(conversation.id()).await?;
        Ok((current, first))
    }

    /// Lists the actor's conversations, most recent activity first.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingServiceError::Repository`] when lookup fails.
    pub async fn list_conversations(
        &self,
        actor: &Actor,
    ) -> MessagingServiceResult<Vec<ConversationSummary>> {
        let mut conversations = self.repository.conversations_for(actor.user_id()).await?;
        conversations.sort_by(|a, b| {
            b.last_activity()
                .cmp(&a.last_activity())
                .then_with(|| a.subject().as_str().cmp(b.subject().as_str()))
        });

        let mut summaries = Vec::with_capacity(conversations.len());
        for conversation in conversations {
            let marker = self
                .repository
                .read_marker(conversation.id(), actor.user_id())
                .await?;
            let last_message = self
                .repository
                .last_message(conversation.id())
                .await?
                .as_ref()
                .map(MessagePreview::from);
            summaries.push(ConversationSummary {
                unread: marker.unread_count(conversation.last_sequence()),
                last_message,
                conversation,
            });
        }
        Ok(summaries)
    }

    /// Returns a conversation the actor takes part in.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingServiceError::ConversationNotFound`] when it does
    /// not exist or the actor is not a participant.
    pub async fn get_conversation(
        &self,
        actor: &Actor,
        id: ConversationId,
    ) -> MessagingServiceResult<Conversation> {
        self.load_for(actor, id).await
    }

    /// Returns messages after `after`, oldest first.
    ///
    /// `limit` defaults to [`DEFAULT_PAGE_SIZE`] and is capped at
    /// [`MAX_PAGE_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns [`MessagingServiceError::ConversationNotFound`] for
    /// non-participants.
    pub async fn list_messages(
        &self,
        actor: &Actor,
        id: ConversationId,
        after: Option<SequenceNumber>,
        limit: Option<usize>,
    ) -> MessagingServiceResult<Vec<Message>> {
        self.load_for(actor, id).await?;
        let page = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        Ok(self
            .repository
            .messages_after(id, after.unwrap_or(SequenceNumber::ZERO), page)
            .await?)
    }

    /// Posts a message and notifies the other participants.
    ///
    /// The message counts as read for its sender.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingServiceError::ConversationNotFound`] for
    /// non-participants and [`MessagingServiceError::Domain`] for an empty or
    /// oversized body.
    pub async fn post_message(
        &self,
        actor: &Actor,
        id: ConversationId,
        body: &str,
    ) -> MessagingServiceResult<Message> {
        let conversation = self.load_for(actor, id).await?;
        let text = MessageBody::new(body, &self.limits)?;
        self.append(actor, &conversation, text).await
    }

    /// Marks messages read up to `up_to`, or all of them.
    ///
    /// Markers never move backwards and never pass the latest message.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingServiceError::ConversationNotFound`] for
    /// non-participants.
    pub async fn mark_read(
        &self,
        actor: &Actor,
        id: ConversationId,
        up_to: Option<SequenceNumber>,
    ) -> MessagingServiceResult<ReadMarker> {
        self.load_for(actor, id).await?;
        let marker = self
            .repository
            .advance_marker(id, actor.user_id(), up_to)
            .await?;
        debug!(conversation_id = %id, last_read = %marker.last_read(), "marked read");
        Ok(marker)
    }

    /// Counts unread messages across the actor's conversations.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingServiceError::Repository`] when lookup fails.
    pub async fn unread_total(&self, actor: &Actor) -> MessagingServiceResult<u64> {
        let mut total: u64 = 0;
        for conversation in self.repository.conversations_for(actor.user_id()).await? {
            let marker = self
                .repository
                .read_marker(conversation.id(), actor.user_id())
                .await?;
            total = total.saturating_add(marker.unread_count(conversation.last_sequence()));
        }
        Ok(total)
    }

    /// Adds a user to a conversation. Staff only; idempotent.
    ///
    /// Existing history counts as read for the newcomer.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingServiceError::AccessDenied`] for client users,
    /// [`MessagingServiceError::UnknownParticipant`] for a missing or
    /// deactivated user, and [`MessagingServiceError::Domain`] when the
    /// tenant rule or the participant limit would be broken.
    pub async fn add_participant(
        &self,
        actor: &Actor,
        id: ConversationId,
        user_id: UserId,
    ) -> MessagingServiceResult<Conversation> {
        AccessPolicy::require_staff(actor)?;
        let conversation = self.load_for(actor, id).await?;
        let newcomer = self.active_user(user_id).await?;
        if conversation.is_participant(user_id) {
            return Ok(conversation);
        }
        let inviter = self.display_name(actor.user_id()).await?;
        let (updated, added) = self
            .repository
            .add_participant(
                id,
                user_id,
                newcomer.client_id(),
                self.limits.max_participants,
            )
            .await
            .map_err(rejection_as_domain)?;
        if !added {
            return Ok(updated);
        }
        info!(conversation_id = %id, %user_id, "added participant");
        self.deliver(user_id, invite_notice(&updated, &inviter)).await;
        Ok(updated)
    }

    /// Returns every conversation, for administrative reporting.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingServiceError::AccessDenied`] for non-admins.
    pub async fn list_all(&self, actor: &Actor) -> MessagingServiceResult<Vec<Conversation>> {
        AccessPolicy::require_admin(actor)?;
        Ok(self.repository.list_conversations().await?)
    }

    async fn append(
        &self,
        actor: &Actor,
        conversation: &Conversation,
        body: MessageBody,
    ) -> MessagingServiceResult<Message> {
        let sender = self.display_name(actor.user_id()).await?;
        let message = self
            .repository
            .append_message(MessageDraft {
                conversation_id: conversation.id(),
                sender: actor.user_id(),
                body,
                sent_at: self.clock.utc(),
            })
            .await?;
        debug!(
            conversation_id = %conversation.id(),
            sequence = %message.sequence(),
            "appended message"
        );

        let notice = Notice::new(NotificationKind::NewMessage)
            .with("sender", sender)
            .with("subject", conversation.subject().as_str())
            .with("preview", message.body().preview())
            .with_link(format!("/conversations/{}", conversation.id()));
        for participant in conversation.participants() {
            if *participant != actor.user_id() {
                self.deliver(*participant, notice.clone()).await;
            }
        }
        Ok(message)
    }

    async fn deliver(&self, recipient: UserId, notice: Notice) {
        let kind = notice.kind();
        if let Err(err) = self.notifier.deliver(recipient, notice).await {
            warn!(%recipient, %kind, error = %err, "notification dropped");
        }
    }

    async fn load(&self, id: ConversationId) -> MessagingServiceResult<Conversation> {
        self.repository
            .find_conversation(id)
            .await?
            .ok_or(MessagingServiceError::ConversationNotFound(id))
    }

    async fn load_for(
        &self,
        actor: &Actor,
        id: ConversationId,
    ) -> MessagingServiceResult<Conversation> {
        self.repository
            .find_conversation(id)
            .await?
            .filter(|conversation| conversation.is_participant(actor.user_id()))
            .ok_or(MessagingServiceError::ConversationNotFound(id))
    }

    async fn display_name(&self, user_id: UserId) -> MessagingServiceResult<String> {
        Ok(self
            .directory
            .find_user(user_id)
            .await?
            .map_or_else(|| UNKNOWN_SENDER.to_owned(), |user| user.display_name().to_owned()))
    }

    async fn active_user(&self, user_id: UserId) -> MessagingServiceResult<User> {
        self.directory
            .find_user(user_id)
            .await?
            .filter(User::is_active)
            .ok_or(MessagingServiceError::UnknownParticipant(user_id))
    }

    async fn resolve_participants(
        &self,
        ids: &BTreeSet<UserId>,
    ) -> MessagingServiceResult<Vec<User>> {
        let mut users = Vec::with_capacity(ids.len());
        for id in ids {
            users.push(self.active_user(*id).await?);
        }
        Ok(users)
    }
}

fn single_tenant(members: &[User]) -> Result<Option<ClientId>, MessagingDomainError> {
    let tenants: BTreeSet<ClientId> = members.iter().filter_map(User::client_id).collect();
    if tenants.len() > 1 {
        return Err(MessagingDomainError::MixedTenants);
    }
    Ok(tenants.into_iter().next())
}

fn rejection_as_domain(err: MessagingRepositoryError) -> MessagingServiceError {
    match err {
        MessagingRepositoryError::Rejected(inner) => MessagingServiceError::Domain(inner),
        other => MessagingServiceError::Repository(other),
    }
}

fn display_name_of(members: &[User], id: UserId) -> String {
    members
        .iter()
        .find(|user| user.id() == id)
        .map_or_else(|| UNKNOWN_SENDER.to_owned(), |user| user.display_name().to_owned())
}

fn invite_notice(conversation: &Conversation, inviter: &str) -> Notice {
    Notice::new(NotificationKind::ConversationInvite)
        .with("subject", conversation.subject().as_str())
        .with("inviter", inviter)
        .with_link(format!("/conversations/{}", conversation.id()))
}
