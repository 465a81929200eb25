//! Domain types for per-user notifications.

mod ids;
mod notification;

pub use ids::NotificationId;
pub use notification::{Notice, Notification, NotificationKind};
