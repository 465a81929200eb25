//! Services for notifications.

mod notifier;
pub mod templates;

pub use notifier::{NotificationService, NotificationServiceError, NotificationServiceResult};
pub use templates::{NoticeTemplate, template_for};
