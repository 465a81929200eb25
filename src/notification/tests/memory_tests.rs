//! Unit tests for the in-memory notification store.

use std::sync::Arc;

use crate::directory::domain::UserId;
use crate::fixtures::fixed_clock;
use crate::notification::{
    adapters::InMemoryNotificationRepository,
    domain::{Notification, NotificationId, NotificationKind},
    ports::NotificationRepository,
};
use chrono::Duration;
use mockable::Clock;

fn notification(recipient: UserId) -> Notification {
    Notification::new(
        recipient,
        NotificationKind::NewMessage,
        "New message".to_owned(),
        "Agenda attached".to_owned(),
        None,
        &fixed_clock(),
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_reads_keep_one_read_time() {
    let repo = Arc::new(InMemoryNotificationRepository::new());
    let stored = notification(UserId::new());
    repo.store(&stored).await.expect("store should succeed");
    let start = fixed_clock().utc();

    let mut handles = Vec::new();
    for minutes in 0..16 {
        let worker = Arc::clone(&repo);
        let read_at = start + Duration::minutes(minutes);
        let id = stored.id();
        handles.push(tokio::spawn(async move {
            worker.mark_read(id, read_at).await
        }));
    }
    let mut seen = Vec::new();
    for handle in handles {
        let marked = handle
            .await
            .expect("task should not panic")
            .expect("mark read should succeed");
        seen.push(marked.read_at());
    }
    let settled = repo
        .find_by_id(stored.id())
        .await
        .expect("lookup should succeed")
        .expect("notification exists");

    assert!(settled.read_at().is_some());
    assert!(seen.iter().all(|read_at| *read_at == settled.read_at()));
}

#[tokio::test(flavor = "multi_thread")]
async fn equal_timestamps_list_latest_insert_first() {
    let repo = InMemoryNotificationRepository::new();
    let recipient = UserId::new();
    let mut inserted: Vec<NotificationId> = Vec::new();
    for _ in 0..5 {
        let next = notification(recipient);
        repo.store(&next).await.expect("store should succeed");
        inserted.push(next.id());
    }

    let listed = repo
        .list_for_recipient(recipient, false)
        .await
        .expect("list should succeed");

    inserted.reverse();
    assert_eq!(listed.iter().map(Notification::id).collect::<Vec<_>>(), inserted);
}
