//! Service layer for rendering, storing and reading notifications.

use crate::auth::domain::Actor;
use crate::directory::domain::UserId;
use crate::notification::{
    domain::{Notice, Notification, NotificationId, NotificationKind},
    ports::{DeliveryError, NotificationRepository, NotificationRepositoryError, NotificationSink},
    services::templates::template_for,
};
use async_trait::async_trait;
use minijinja::Environment;
use mockable::Clock;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for notification operations.
#[derive(Debug, Error)]
pub enum NotificationServiceError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] NotificationRepositoryError),
    /// A template failed to render.
    #[error("failed to render {kind} notification: {reason}")]
    TemplateRender {
        /// Kind being rendered.
        kind: NotificationKind,
        /// Renderer message.
        reason: String,
    },
    /// The notification does not exist or belongs to someone else.
    #[error("notification not found: {0}")]
    NotFound(NotificationId),
}

/// Result type for notification service operations.
pub type NotificationServiceResult<T> = Result<T, NotificationServiceError>;

/// Notification inbox service.
#[derive(Clone)]
pub struct NotificationService<R, C>
where
    R: NotificationRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> NotificationService<R, C>
where
    R: NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new notification service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Renders and stores a notification for `recipient`.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::TemplateRender`] when a template
    /// fails and [`NotificationServiceError::Repository`] when storing fails.
    pub async fn notify(
        &self,
        recipient: UserId,
        notice: &Notice,
    ) -> NotificationServiceResult<Notification> {
        let template = template_for(notice.kind());
        let title = render(notice.kind(), template.title, notice.context())?;
        let body = render(notice.kind(), template.body, notice.context())?;
        let notification = Notification::new(
            recipient,
            notice.kind(),
            title,
            body,
            notice.link().map(str::to_owned),
            &*self.clock,
        );
        self.repository.store(&notification).await?;
        debug!(
            notification_id = %notification.id(),
            recipient = %recipient,
            kind = %notice.kind(),
            "stored notification"
        );
        Ok(notification)
    }

    /// Lists the actor's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when lookup fails.
    pub async fn list(
        &self,
        actor: &Actor,
        unread_only: bool,
    ) -> NotificationServiceResult<Vec<Notification>> {
        Ok(self
            .repository
            .list_for_recipient(actor.user_id(), unread_only)
            .await?)
    }

    /// Marks one of the actor's notifications read.
    ///
    /// Repeating the call is harmless and keeps the first read time.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::NotFound`] when the notification is
    /// missing or addressed to another user.
    pub async fn mark_read(
        &self,
        actor: &Actor,
        id: NotificationId,
    ) -> NotificationServiceResult<Notification> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(|found| found.recipient() == actor.user_id())
            .ok_or(NotificationServiceError::NotFound(id))?;
        Ok(self.repository.mark_read(id, self.clock.utc()).await?)
    }

    /// Marks every unread notification of the actor read.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when the update fails.
    pub async fn mark_all_read(&self, actor: &Actor) -> NotificationServiceResult<usize> {
        Ok(self
            .repository
            .mark_all_read(actor.user_id(), self.clock.utc())
            .await?)
    }

    /// Counts the actor's unread notifications.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Repository`] when lookup fails.
    pub async fn unread_count(&self, actor: &Actor) -> NotificationServiceResult<usize> {
        Ok(self
            .repository
            .list_for_recipient(actor.user_id(), true)
            .await?
            .len())
    }
}

#[async_trait]
impl<R, C> NotificationSink for NotificationService<R, C>
where
    R: NotificationRepository,
    C: Clock + Send + Sync,
{
    async fn deliver(
        &self,
        recipient: UserId,
        notice: Notice,
    ) -> Result<NotificationId, DeliveryError> {
        self.notify(recipient, &notice)
            .await
            .map(|notification| notification.id())
            .map_err(|err| DeliveryError(err.to_string()))
    }
}

fn render(
    kind: NotificationKind,
    template: &str,
    context: &Map<String, Value>,
) -> NotificationServiceResult<String> {
    Environment::new()
        .render_str(template, context)
        .map_err(|error| NotificationServiceError::TemplateRender {
            kind,
            reason: error.to_string(),
        })
}
