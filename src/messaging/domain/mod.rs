//! Domain types for conversations, messages and read state.

mod content;
mod conversation;
mod error;
mod ids;
mod limits;
mod message;
mod read_marker;

pub use content::{MessageBody, PREVIEW_CHARS, Subject};
pub use conversation::Conversation;
pub use error::MessagingDomainError;
pub use ids::{ConversationId, MessageId, SequenceNumber};
pub use limits::MessagingLimits;
pub use message::Message;
pub use read_marker::ReadMarker;
