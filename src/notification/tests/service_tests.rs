//! Unit tests for notification rendering and inbox operations.

use std::sync::Arc;

use crate::auth::domain::Actor;
use crate::clock::FixedClock;
use crate::directory::domain::{UserId, UserRole};
use crate::notification::{
    adapters::InMemoryNotificationRepository,
    domain::{Notice, NotificationId, NotificationKind},
    ports::NotificationSink,
    services::{NotificationService, NotificationServiceError},
};
use chrono::{Duration, TimeZone, Utc};
use rstest::{fixture, rstest};

type TestService = NotificationService<InMemoryNotificationRepository, FixedClock>;

struct Harness {
    service: TestService,
    clock: FixedClock,
    reader: Actor,
}

#[fixture]
fn harness() -> Harness {
    let start = Utc
        .with_ymd_and_hms(2026, 3, 2, 8, 30, 0)
        .single()
        .expect("valid date");
    let clock = FixedClock::at(start);
    let service = NotificationService::new(
        Arc::new(InMemoryNotificationRepository::new()),
        Arc::new(clock.clone()),
    );
    Harness {
        service,
        clock,
        reader: Actor::new(UserId::new(), UserRole::Employee, None),
    }
}

fn message_notice() -> Notice {
    Notice::new(NotificationKind::NewMessage)
        .with("sender", "Robin")
        .with("subject", "Kick-off")
        .with("preview", "Agenda attached")
        .with_link("/conversations/1")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn notify_renders_kind_templates(harness: Harness) {
    let stored = harness
        .service
        .notify(harness.reader.user_id(), &message_notice())
        .await
        .expect("notify should succeed");

    assert_eq!(stored.title(), "New message from Robin");
    assert_eq!(stored.body(), "Kick-off: Agenda attached");
    assert_eq!(stored.link(), Some("/conversations/1"));
    assert!(stored.is_unread());
}

#[rstest]
#[case::status(
    Notice::new(NotificationKind::ProjectStatusChanged)
        .with("project", "Atlas")
        .with("previous", "planning")
        .with("status", "active"),
    "Atlas is now active",
    "Status changed from planning to active."
)]
#[case::invite(
    Notice::new(NotificationKind::ConversationInvite)
        .with("subject", "Budget")
        .with("inviter", "Sam"),
    "You were added to \"Budget\"",
    "Sam added you to the conversation."
)]
#[case::system(
    Notice::new(NotificationKind::System)
        .with("title", "Maintenance")
        .with("body", "Back at noon."),
    "Maintenance",
    "Back at noon."
)]
#[tokio::test(flavor = "multi_thread")]
async fn other_kinds_render(
    harness: Harness,
    #[case] notice: Notice,
    #[case] title: &str,
    #[case] body: &str,
) {
    let stored = harness
        .service
        .notify(harness.reader.user_id(), &notice)
        .await
        .expect("notify should succeed");

    assert_eq!(stored.title(), title);
    assert_eq!(stored.body(), body);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_is_newest_first_and_filters_unread(harness: Harness) {
    let recipient = harness.reader.user_id();
    let older = harness
        .service
        .notify(recipient, &message_notice())
        .await
        .expect("notify should succeed");
    harness.clock.advance(Duration::minutes(1));
    let newer = harness
        .service
        .notify(recipient, &message_notice())
        .await
        .expect("notify should succeed");
    harness
        .service
        .mark_read(&harness.reader, older.id())
        .await
        .expect("mark read should succeed");

    let all = harness
        .service
        .list(&harness.reader, false)
        .await
        .expect("list should succeed");
    let unread = harness
        .service
        .list(&harness.reader, true)
        .await
        .expect("list should succeed");

    let ids: Vec<NotificationId> = all.iter().map(|n| n.id()).collect();
    assert_eq!(ids, vec![newer.id(), older.id()]);
    assert_eq!(unread.len(), 1);
    assert_eq!(unread.first().map(|n| n.id()), Some(newer.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_read_keeps_first_read_time(harness: Harness) {
    let stored = harness
        .service
        .notify(harness.reader.user_id(), &message_notice())
        .await
        .expect("notify should succeed");

    let first = harness
        .service
        .mark_read(&harness.reader, stored.id())
        .await
        .expect("mark read should succeed");
    harness.clock.advance(Duration::hours(2));
    let second = harness
        .service
        .mark_read(&harness.reader, stored.id())
        .await
        .expect("repeat mark read should succeed");

    assert!(first.read_at().is_some());
    assert_eq!(first.read_at(), second.read_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_read_hides_other_users_notifications(harness: Harness) {
    let stored = harness
        .service
        .notify(harness.reader.user_id(), &message_notice())
        .await
        .expect("notify should succeed");
    let intruder = Actor::new(UserId::new(), UserRole::Admin, None);

    let result = harness.service.mark_read(&intruder, stored.id()).await;

    assert!(matches!(result, Err(NotificationServiceError::NotFound(id)) if id == stored.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_all_read_counts_only_unread(harness: Harness) {
    let recipient = harness.reader.user_id();
    for _ in 0..3 {
        harness
            .service
            .notify(recipient, &message_notice())
            .await
            .expect("notify should succeed");
    }
    harness
        .service
        .notify(UserId::new(), &message_notice())
        .await
        .expect("notify should succeed");

    let before = harness
        .service
        .unread_count(&harness.reader)
        .await
        .expect("count should succeed");
    let changed = harness
        .service
        .mark_all_read(&harness.reader)
        .await
        .expect("mark all should succeed");
    let again = harness
        .service
        .mark_all_read(&harness.reader)
        .await
        .expect("mark all should succeed");
    let after = harness
        .service
        .unread_count(&harness.reader)
        .await
        .expect("count should succeed");

    assert_eq!((before, changed, again, after), (3, 3, 0, 0));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sink_delivery_stores_notification(harness: Harness) {
    let sink: &dyn NotificationSink = &harness.service;

    let id = sink
        .deliver(harness.reader.user_id(), message_notice())
        .await
        .expect("delivery should succeed");

    let inbox = harness
        .service
        .list(&harness.reader, true)
        .await
        .expect("list should succeed");
    assert_eq!(inbox.first().map(|n| n.id()), Some(id));
}
