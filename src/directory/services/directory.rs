//! Service layer for tenant and user administration and login.

use crate::directory::{
    domain::{
        Client, ClientId, ClientSlug, DirectoryDomainError, EmailAddress, PasswordHash, User,
        UserId, UserProfile, UserRole,
    },
    ports::{
        DirectoryRepository, DirectoryRepositoryError, PasswordHasher, PasswordHashingError,
    },
};
use mockable::Clock;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Minimum password length in characters.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Hashed once and verified against when a login names an unknown email, so
/// misses cost the same hashing work as hits.
const DECOY_PASSWORD: &str = "portico-decoy-password";

/// Request payload for registering a user.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    email: String,
    display_name: String,
    role: UserRole,
    password: String,
    client_id: Option<ClientId>,
}

impl RegisterUserRequest {
    /// Creates a request with the mandatory fields.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        display_name: impl Into<String>,
        role: UserRole,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
            role,
            password: password.into(),
            client_id: None,
        }
    }

    /// Attaches the user to a client organisation.
    #[must_use]
    pub const fn for_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }
}

impl std::fmt::Debug for RegisterUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUserRequest")
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("role", &self.role)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// Service-level errors for directory operations.
#[derive(Debug, Error)]
pub enum DirectoryServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] DirectoryDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] DirectoryRepositoryError),
    /// Password hashing failed.
    #[error(transparent)]
    Hashing(#[from] PasswordHashingError),
    /// The referenced client does not exist.
    #[error("client not found: {0}")]
    UnknownClient(ClientId),
    /// The referenced user does not exist.
    #[error("user not found: {0}")]
    UnknownUser(UserId),
    /// Email/password did not match an active account.
    #[error("invalid email or password")]
    InvalidCredentials,
}

/// Result type for directory service operations.
pub type DirectoryServiceResult<T> = Result<T, DirectoryServiceError>;

/// Tenant and user administration service.
#[derive(Clone)]
pub struct DirectoryService<R, C>
where
    R: DirectoryRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<C>,
    decoy: Arc<OnceCell<PasswordHash>>,
}

impl<R, C> DirectoryService<R, C>
where
    R: DirectoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new directory service.
    #[must_use]
    pub fn new(repository: Arc<R>, hasher: Arc<dyn PasswordHasher>, clock: Arc<C>) -> Self {
        Self {
            repository,
            hasher,
            clock,
            decoy: Arc::new(OnceCell::new()),
        }
    }

    /// Registers a client organisation.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Domain`] for an invalid name or slug
    /// and [`DirectoryServiceError::Repository`] when the slug is taken.
    pub async fn register_client(
        &self,
        name: &str,
        slug: &str,
    ) -> DirectoryServiceResult<Client> {
        let client = Client::new(name, ClientSlug::new(slug)?, &*self.clock)?;
        self.repository.store_client(&client).await?;
        info!(client_id = %client.id(), slug = %client.slug(), "registered client");
        Ok(client)
    }

    /// Registers a user, hashing the supplied password.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Domain`] for invalid fields or a short
    /// password, [`DirectoryServiceError::UnknownClient`] when the tenant does
    /// not exist and [`DirectoryServiceError::Repository`] for a duplicate
    /// email.
    pub async fn register_user(&self, request: RegisterUserRequest) -> DirectoryServiceResult<User> {
        let RegisterUserRequest {
            email,
            display_name,
            role,
            password,
            client_id,
        } = request;

        let profile = UserProfile::new(EmailAddress::new(email)?, display_name, role, client_id)?;
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(DirectoryDomainError::PasswordTooShort {
                min: MIN_PASSWORD_CHARS,
            }
            .into());
        }
        if let Some(tenant) = profile.client_id()
            && self.repository.find_client(tenant).await?.is_none()
        {
            return Err(DirectoryServiceError::UnknownClient(tenant));
        }

        let hash = self.run_hasher(move |hasher| hasher.hash(&password)).await?;
        let user = User::new(profile, hash, &*self.clock);
        self.repository.store_user(&user).await?;
        info!(user_id = %user.id(), role = %user.role(), "registered user");
        Ok(user)
    }

    /// Checks a login attempt and returns the matching active user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::InvalidCredentials`] for an unknown
    /// email, a wrong password or a deactivated account. Malformed emails are
    /// reported the same way.
    pub async fn authenticate(&self, email: &str, password: &str) -> DirectoryServiceResult<User> {
        let Ok(address) = EmailAddress::new(email) else {
            return Err(DirectoryServiceError::InvalidCredentials);
        };
        let Some(user) = self.repository.find_user_by_email(&address).await? else {
            let decoy = Arc::clone(&self.decoy);
            let attempt = password.to_owned();
            self.run_hasher(move |hasher| {
                let hash = decoy.get_or_try_init(|| hasher.hash(DECOY_PASSWORD))?;
                hasher.verify(&attempt, hash)
            })
            .await?;
            warn!(email = %address, "login for unknown email");
            return Err(DirectoryServiceError::InvalidCredentials);
        };

        let stored = user.password_hash().clone();
        let attempt = password.to_owned();
        let matches = self
            .run_hasher(move |hasher| hasher.verify(&attempt, &stored))
            .await?;

        if !matches || !user.is_active() {
            warn!(user_id = %user.id(), "rejected login");
            return Err(DirectoryServiceError::InvalidCredentials);
        }
        Ok(user)
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Repository`] when lookup fails.
    pub async fn find_user(&self, id: UserId) -> DirectoryServiceResult<Option<User>> {
        Ok(self.repository.find_user(id).await?)
    }

    /// Finds a client by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Repository`] when lookup fails.
    pub async fn find_client(&self, id: ClientId) -> DirectoryServiceResult<Option<Client>> {
        Ok(self.repository.find_client(id).await?)
    }

    /// Finds a client by slug.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Domain`] for a malformed slug.
    pub async fn find_client_by_slug(&self, slug: &str) -> DirectoryServiceResult<Option<Client>> {
        let parsed = ClientSlug::new(slug)?;
        Ok(self.repository.find_client_by_slug(&parsed).await?)
    }

    /// Lists all users.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Repository`] when lookup fails.
    pub async fn list_users(&self) -> DirectoryServiceResult<Vec<User>> {
        Ok(self.repository.list_users().await?)
    }

    /// Lists all clients.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Repository`] when lookup fails.
    pub async fn list_clients(&self) -> DirectoryServiceResult<Vec<Client>> {
        Ok(self.repository.list_clients().await?)
    }

    /// Deactivates a user account.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::UnknownUser`] when the user does not
    /// exist.
    pub async fn deactivate_user(&self, id: UserId) -> DirectoryServiceResult<User> {
        let mut user = self
            .repository
            .find_user(id)
            .await?
            .ok_or(DirectoryServiceError::UnknownUser(id))?;
        user.deactivate();
        self.repository.update_user(&user).await?;
        info!(user_id = %id, "deactivated user");
        Ok(user)
    }

    async fn run_hasher<T, F>(&self, job: F) -> DirectoryServiceResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn PasswordHasher) -> Result<T, PasswordHashingError> + Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        let outcome = tokio::task::spawn_blocking(move || job(hasher.as_ref()))
            .await
            .map_err(|err| PasswordHashingError(err.to_string()))?;
        Ok(outcome?)
    }
}
