//! Per-kind notification text.

use crate::notification::domain::NotificationKind;

/// Title and body templates for one notification kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeTemplate {
    /// Title template.
    pub title: &'static str,
    /// Body template.
    pub body: &'static str,
}

/// Returns the templates used to render `kind`.
#[must_use]
pub const fn template_for(kind: NotificationKind) -> NoticeTemplate {
    match kind {
        NotificationKind::NewMessage => NoticeTemplate {
            title: "New message from {{ sender }}",
            body: "{{ subject }}: {{ preview }}",
        },
        NotificationKind::ProjectStatusChanged => NoticeTemplate {
            title: "{{ project }} is now {{ status }}",
            body: "Status changed from {{ previous }} to {{ status }}.",
        },
        NotificationKind::ConversationInvite => NoticeTemplate {
            title: "You were added to \"{{ subject }}\"",
            body: "{{ inviter }} added you to the conversation.",
        },
        NotificationKind::System => NoticeTemplate {
            title: "{{ title }}",
            body: "{{ body }}",
        },
    }
}
