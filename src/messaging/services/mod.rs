//! Services for conversations and messages.

mod conversations;

pub use conversations::{
    ConversationSummary, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MessagePreview, MessagingService,
    MessagingServiceError, MessagingServiceResult, StartConversationRequest,
};
