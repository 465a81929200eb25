//! Outbound port used by other contexts to raise notifications.

use crate::directory::domain::UserId;
use crate::notification::domain::{Notice, NotificationId};
use async_trait::async_trait;
use thiserror::Error;

/// Delivery failure reported by a [`NotificationSink`].
#[derive(Debug, Clone, Error)]
#[error("notification delivery failed: {0}")]
pub struct DeliveryError(pub String);

/// Accepts notices for delivery to a single recipient.
///
/// Callers treat delivery as best-effort: a failure is logged and never
/// rolls back the operation that raised the notice.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Renders and stores a notification for `recipient`.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] when rendering or persistence fails.
    async fn deliver(
        &self,
        recipient: UserId,
        notice: Notice,
    ) -> Result<NotificationId, DeliveryError>;
}
