//! Port definitions for notifications.

pub mod repository;
pub mod sink;

pub use repository::{
    NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult,
};
pub use sink::{DeliveryError, NotificationSink};
