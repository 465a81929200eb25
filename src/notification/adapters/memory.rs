//! In-memory notification repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::domain::UserId;
use crate::notification::{
    domain::{Notification, NotificationId},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};

/// Thread-safe in-memory notification store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationRepository {
    state: Arc<RwLock<InboxState>>,
}

#[derive(Debug, Default)]
struct InboxState {
    entries: HashMap<NotificationId, Entry>,
    stored: u64,
}

/// A notification with its insertion position, used to order equal
/// timestamps.
#[derive(Debug)]
struct Entry {
    position: u64,
    notification: Notification,
}

impl InMemoryNotificationRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> NotificationRepositoryError {
    NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn store(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.entries.contains_key(&notification.id()) {
            return Err(NotificationRepositoryError::Duplicate(notification.id()));
        }
        state.stored += 1;
        let position = state.stored;
        state.entries.insert(
            notification.id(),
            Entry {
                position,
                notification: notification.clone(),
            },
        );
        Ok(())
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        read_at: DateTime<Utc>,
    ) -> NotificationRepositoryResult<Notification> {
        let mut state = self.state.write().map_err(poisoned)?;
        let entry = state
            .entries
            .get_mut(&id)
            .ok_or(NotificationRepositoryError::NotFound(id))?;
        entry.notification.mark_read_at(read_at);
        Ok(entry.notification.clone())
    }

    async fn find_by_id(
        &self,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.entries.get(&id).map(|entry| entry.notification.clone()))
    }

    async fn list_for_recipient(
        &self,
        recipient: UserId,
        unread_only: bool,
    ) -> NotificationRepositoryResult<Vec<Notification>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut found: Vec<&Entry> = state
            .entries
            .values()
            .filter(|entry| {
                let n = &entry.notification;
                n.recipient() == recipient && (!unread_only || n.is_unread())
            })
            .collect();
        found.sort_by(|a, b| {
            b.notification
                .created_at()
                .cmp(&a.notification.created_at())
                .then_with(|| b.position.cmp(&a.position))
        });
        Ok(found
            .into_iter()
            .map(|entry| entry.notification.clone())
            .collect())
    }

    async fn mark_all_read(
        &self,
        recipient: UserId,
        read_at: DateTime<Utc>,
    ) -> NotificationRepositoryResult<usize> {
        let mut state = self.state.write().map_err(poisoned)?;
        let mut changed = 0;
        for entry in state.entries.values_mut() {
            let notification = &mut entry.notification;
            if notification.recipient() == recipient && notification.mark_read_at(read_at) {
                changed += 1;
            }
        }
        Ok(changed)
    }
}
