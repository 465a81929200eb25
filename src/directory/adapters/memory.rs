//! In-memory directory repository.
//!
//! Replaces the module-level mock arrays with lock-guarded maps so that
//! concurrent registrations cannot race on the uniqueness checks.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::{
    domain::{Client, ClientId, ClientSlug, EmailAddress, User, UserId},
    ports::{DirectoryRepository, DirectoryRepositoryError, DirectoryRepositoryResult},
};

/// Thread-safe in-memory store of clients and users.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    clients: HashMap<ClientId, Client>,
    slug_index: HashMap<ClientSlug, ClientId>,
    users: HashMap<UserId, User>,
    email_index: HashMap<EmailAddress, UserId>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DirectoryRepositoryResult<std::sync::RwLockReadGuard<'_, DirectoryState>> {
        self.state.read().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(
        &self,
    ) -> DirectoryRepositoryResult<std::sync::RwLockWriteGuard<'_, DirectoryState>> {
        self.state.write().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl DirectoryRepository for InMemoryDirectory {
    async fn store_client(&self, client: &Client) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        if state.slug_index.contains_key(client.slug()) {
            return Err(DirectoryRepositoryError::DuplicateSlug(client.slug().clone()));
        }
        state.slug_index.insert(client.slug().clone(), client.id());
        state.clients.insert(client.id(), client.clone());
        Ok(())
    }

    async fn store_user(&self, user: &User) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        if state.email_index.contains_key(user.email()) {
            return Err(DirectoryRepositoryError::DuplicateEmail(user.email().clone()));
        }
        state.email_index.insert(user.email().clone(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn update_user(&self, user: &User) -> DirectoryRepositoryResult<()> {
        let mut state = self.write()?;
        let previous_email = state
            .users
            .get(&user.id())
            .ok_or(DirectoryRepositoryError::UserNotFound(user.id()))?
            .email()
            .clone();

        if previous_email != *user.email() {
            if let Some(&owner) = state.email_index.get(user.email())
                && owner != user.id()
            {
                return Err(DirectoryRepositoryError::DuplicateEmail(user.email().clone()));
            }
            state.email_index.remove(&previous_email);
            state.email_index.insert(user.email().clone(), user.id());
        }
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_client(&self, id: ClientId) -> DirectoryRepositoryResult<Option<Client>> {
        Ok(self.read()?.clients.get(&id).cloned())
    }

    async fn find_client_by_slug(
        &self,
        slug: &ClientSlug,
    ) -> DirectoryRepositoryResult<Option<Client>> {
        let state = self.read()?;
        Ok(state
            .slug_index
            .get(slug)
            .and_then(|id| state.clients.get(id))
            .cloned())
    }

    async fn find_user(&self, id: UserId) -> DirectoryRepositoryResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn find_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> DirectoryRepositoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state
            .email_index
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn users_of_client(&self, client_id: ClientId) -> DirectoryRepositoryResult<Vec<User>> {
        let state = self.read()?;
        let mut users: Vec<User> = state
            .users
            .values()
            .filter(|u| u.client_id() == Some(client_id))
            .cloned()
            .collect();
        users.sort_by(|a, b| a.email().as_str().cmp(b.email().as_str()));
        Ok(users)
    }

    async fn list_clients(&self) -> DirectoryRepositoryResult<Vec<Client>> {
        let mut clients: Vec<Client> = self.read()?.clients.values().cloned().collect();
        clients.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(clients)
    }

    async fn list_users(&self) -> DirectoryRepositoryResult<Vec<User>> {
        let mut users: Vec<User> = self.read()?.users.values().cloned().collect();
        users.sort_by(|a, b| a.email().as_str().cmp(b.email().as_str()));
        Ok(users)
    }
}
