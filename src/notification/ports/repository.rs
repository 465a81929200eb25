//! Repository port for notification persistence.

use crate::directory::domain::UserId;
use crate::notification::domain::{Notification, NotificationId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification repository operations.
pub type NotificationRepositoryResult<T> = Result<T, NotificationRepositoryError>;

/// Persistence contract for notifications.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Stores a new notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::Duplicate`] when the identifier
    /// already exists.
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()>;

    /// Sets the read time to `read_at` unless one is already recorded, and
    /// returns the stored notification.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationRepositoryError::NotFound`] when the
    /// notification does not exist.
    async fn mark_read(
        &self,
        id: NotificationId,
        read_at: chrono::DateTime<chrono::Utc>,
    ) -> NotificationRepositoryResult<Notification>;

    /// Finds a notification by identifier.
    async fn find_by_id(
        &self,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>>;

    /// Returns the recipient's notifications, newest first. Notifications
    /// created at the same instant are ordered by insertion, latest first.
    async fn list_for_recipient(
        &self,
        recipient: UserId,
        unread_only: bool,
    ) -> NotificationRepositoryResult<Vec<Notification>>;

    /// Marks every unread notification of the recipient as read and returns
    /// how many changed.
    async fn mark_all_read(
        &self,
        recipient: UserId,
        read_at: chrono::DateTime<chrono::Utc>,
    ) -> NotificationRepositoryResult<usize>;
}

/// Errors returned by notification repository implementations.
#[derive(Debug, Clone, Error)]
pub enum NotificationRepositoryError {
    /// A notification with this identifier already exists.
    #[error("duplicate notification: {0}")]
    Duplicate(NotificationId),

    /// The notification was not found.
    #[error("notification not found: {0}")]
    NotFound(NotificationId),

    /// Persistence failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
