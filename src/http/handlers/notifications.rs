//! Notification inbox endpoints.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::http::{
    error::ApiError,
    extract::{ApiPath, ApiQuery},
    session::CurrentActor,
    state::AppState,
};
use crate::notification::domain::{Notification, NotificationId};

/// Filters accepted by `GET /api/notifications`.
#[derive(Debug, Default, Deserialize)]
pub struct InboxQuery {
    /// Only unread notifications.
    #[serde(default)]
    pub unread: bool,
}

/// Result of `POST /api/notifications/read-all`.
#[derive(Debug, Serialize)]
pub struct MarkedRead {
    /// Notifications that changed from unread to read.
    pub updated: usize,
}

/// `GET /api/notifications`.
///
/// # Errors
///
/// Returns 401 without a valid session.
pub async fn list(
    State(state): State<AppState>,
    current: CurrentActor,
    ApiQuery(query): ApiQuery<InboxQuery>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let inbox = state
        .services
        .notifications
        .list(&current.actor, query.unread)
        .await?;
    Ok(Json(inbox))
}

/// `POST /api/notifications/{id}/read`.
///
/// # Errors
///
/// Returns 404 for another user's notification.
pub async fn mark_read(
    State(state): State<AppState>,
    current: CurrentActor,
    ApiPath(id): ApiPath<NotificationId>,
) -> Result<Json<Notification>, ApiError> {
    let notification = state
        .services
        .notifications
        .mark_read(&current.actor, id)
        .await?;
    Ok(Json(notification))
}

/// `POST /api/notifications/read-all`.
///
/// # Errors
///
/// Returns 401 without a valid session.
pub async fn mark_all_read(
    State(state): State<AppState>,
    current: CurrentActor,
) -> Result<Json<MarkedRead>, ApiError> {
    let updated = state
        .services
        .notifications
        .mark_all_read(&current.actor)
        .await?;
    Ok(Json(MarkedRead { updated }))
}
