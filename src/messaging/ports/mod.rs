//! Port definitions for messaging persistence.

pub mod repository;

pub use repository::{
    MessageDraft, MessagingRepository, MessagingRepositoryError, MessagingRepositoryResult,
};
