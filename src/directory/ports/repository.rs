//! Repository port for tenant and user persistence.

use crate::directory::domain::{Client, ClientId, ClientSlug, EmailAddress, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory repository operations.
pub type DirectoryRepositoryResult<T> = Result<T, DirectoryRepositoryError>;

/// Persistence contract for clients and users.
///
/// Other bounded contexts depend on this port (through `Arc<dyn
/// DirectoryRepository>`) to resolve participants, team members and tenant
/// membership.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Stores a new client.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::DuplicateSlug`] when the slug is
    /// already taken.
    async fn store_client(&self, client: &Client) -> DirectoryRepositoryResult<()>;

    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::DuplicateEmail`] when the email is
    /// already registered.
    async fn store_user(&self, user: &User) -> DirectoryRepositoryResult<()>;

    /// Persists changes to an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::UserNotFound`] when the user does
    /// not exist.
    async fn update_user(&self, user: &User) -> DirectoryRepositoryResult<()>;

    /// Finds a client by identifier.
    async fn find_client(&self, id: ClientId) -> DirectoryRepositoryResult<Option<Client>>;

    /// Finds a client by slug.
    async fn find_client_by_slug(
        &self,
        slug: &ClientSlug,
    ) -> DirectoryRepositoryResult<Option<Client>>;

    /// Finds a user by identifier.
    async fn find_user(&self, id: UserId) -> DirectoryRepositoryResult<Option<User>>;

    /// Finds a user by email.
    async fn find_user_by_email(
        &self,
        email: &EmailAddress,
    ) -> DirectoryRepositoryResult<Option<User>>;

    /// Returns every user belonging to the given client.
    async fn users_of_client(&self, client_id: ClientId) -> DirectoryRepositoryResult<Vec<User>>;

    /// Returns all clients ordered by name.
    async fn list_clients(&self) -> DirectoryRepositoryResult<Vec<Client>>;

    /// Returns all users ordered by email.
    async fn list_users(&self) -> DirectoryRepositoryResult<Vec<User>>;
}

/// Errors returned by directory repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryRepositoryError {
    /// A client with this slug already exists.
    #[error("duplicate client slug: {0}")]
    DuplicateSlug(ClientSlug),

    /// A user with this email already exists.
    #[error("duplicate email: {0}")]
    DuplicateEmail(EmailAddress),

    /// The user was not found.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
