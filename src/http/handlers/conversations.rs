//! Conversation, message and read-state endpoints.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::directory::domain::UserId;
use crate::http::{
    error::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    session::CurrentActor,
    state::AppState,
};
use crate::messaging::{
    domain::{Conversation, ConversationId, Message, ReadMarker, SequenceNumber},
    services::{ConversationSummary, StartConversationRequest},
};

/// Body of `POST /api/conversations`.
#[derive(Debug, Deserialize)]
pub struct StartConversation {
    /// Subject line.
    pub subject: String,
    /// Users to invite besides the caller.
    pub participants: Vec<UserId>,
    /// Optional first message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `POST /api/conversations`.
#[derive(Debug, Serialize)]
pub struct StartedConversation {
    /// The new conversation.
    pub conversation: Conversation,
    /// The opening message, when one was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

/// Paging for `GET /api/conversations/{id}/messages`.
#[derive(Debug, Default, Deserialize)]
pub struct MessagePage {
    /// Only messages with a higher sequence number.
    pub after: Option<SequenceNumber>,
    /// Page size.
    pub limit: Option<usize>,
}

/// Body of `POST /api/conversations/{id}/messages`.
#[derive(Debug, Deserialize)]
pub struct NewMessage {
    /// Message text.
    pub body: String,
}

/// Query of `POST /api/conversations/{id}/read`.
#[derive(Debug, Default, Deserialize)]
pub struct ReadUpTo {
    /// Last message to mark read; all of them when absent.
    pub up_to: Option<SequenceNumber>,
}

/// Body of `POST /api/conversations/{id}/participants`.
#[derive(Debug, Deserialize)]
pub struct NewParticipant {
    /// User to add.
    pub user_id: UserId,
}

/// Result of `GET /api/messages/unread-count`.
#[derive(Debug, Serialize)]
pub struct UnreadCount {
    /// Unread messages across all of the caller's conversations.
    pub unread: u64,
}

/// `GET /api/conversations`.
///
/// # Errors
///
/// Returns 401 without a valid session.
pub async fn list(
    State(state): State<AppState>,
    current: CurrentActor,
) -> Result<Json<Vec<ConversationSummary>>, ApiError> {
    let summaries = state
        .services
        .messaging
        .list_conversations(&current.actor)
        .await?;
    Ok(Json(summaries))
}

/// `POST /api/conversations`.
///
/// # Errors
///
/// Returns 400 for an invalid subject, body or participant list.
pub async fn start(
    State(state): State<AppState>,
    current: CurrentActor,
    ApiJson(body): ApiJson<StartConversation>,
) -> Result<(StatusCode, Json<StartedConversation>), ApiError> {
    let mut request = StartConversationRequest::new(body.subject, body.participants);
    if let Some(text) = body.message {
        request = request.with_opening_message(text);
    }
    let (conversation, message) = state
        .services
        .messaging
        .start_conversation(&current.actor, request)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(StartedConversation {
            conversation,
            message,
        }),
    ))
}

/// `GET /api/conversations/{id}`.
///
/// # Errors
///
/// Returns 404 when the caller is not a participant.
pub async fn get(
    State(state): State<AppState>,
    current: CurrentActor,
    ApiPath(id): ApiPath<ConversationId>,
) -> Result<Json<Conversation>, ApiError> {
    let conversation = state
        .services
        .messaging
        .get_conversation(&current.actor, id)
        .await?;
    Ok(Json(conversation))
}

/// `GET /api/conversations/{id}/messages`.
///
/// # Errors
///
/// Returns 404 when the caller is not a participant.
pub async fn messages(
    State(state): State<AppState>,
    current: CurrentActor,
    ApiPath(id): ApiPath<ConversationId>,
    ApiQuery(page): ApiQuery<MessagePage>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let listing = state
        .services
        .messaging
        .list_messages(&current.actor, id, page.after, page.limit)
        .await?;
    Ok(Json(listing))
}

/// `POST /api/conversations/{id}/messages`.
///
/// # Errors
///
/// Returns 404 for non-participants and 400 for an empty or oversized body.
pub async fn post(
    State(state): State<AppState>,
    current: CurrentActor,
    ApiPath(id): ApiPath<ConversationId>,
    ApiJson(message): ApiJson<NewMessage>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let posted = state
        .services
        .messaging
        .post_message(&current.actor, id, &message.body)
        .await?;
    Ok((StatusCode::CREATED, Json(posted)))
}

/// `POST /api/conversations/{id}/read`.
///
/// # Errors
///
/// Returns 404 when the caller is not a participant.
pub async fn mark_read(
    State(state): State<AppState>,
    current: CurrentActor,
    ApiPath(id): ApiPath<ConversationId>,
    ApiQuery(query): ApiQuery<ReadUpTo>,
) -> Result<Json<ReadMarker>, ApiError> {
    let marker = state
        .services
        .messaging
        .mark_read(&current.actor, id, query.up_to)
        .await?;
    Ok(Json(marker))
}

/// `POST /api/conversations/{id}/participants`.
///
/// # Errors
///
/// Returns 403 for client users and 400 when the user cannot join.
pub async fn add_participant(
    State(state): State<AppState>,
    current: CurrentActor,
    ApiPath(id): ApiPath<ConversationId>,
    ApiJson(participant): ApiJson<NewParticipant>,
) -> Result<Json<Conversation>, ApiError> {
    let conversation = state
        .services
        .messaging
        .add_participant(&current.actor, id, participant.user_id)
        .await?;
    Ok(Json(conversation))
}

/// `GET /api/messages/unread-count`.
///
/// # Errors
///
/// Returns 401 without a valid session.
pub async fn unread_count(
    State(state): State<AppState>,
    current: CurrentActor,
) -> Result<Json<UnreadCount>, ApiError> {
    let unread = state.services.messaging.unread_total(&current.actor).await?;
    Ok(Json(UnreadCount { unread }))
}
