//! User account aggregate and role model.

use super::{ClientId, DirectoryDomainError, EmailAddress, ParseUserRoleError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which portal a user belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// A member of a client organisation using the client portal.
    Client,
    /// A consultant using the employee portal.
    Employee,
    /// An operator of the admin/ERP console.
    Admin,
}

impl UserRole {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Employee => "employee",
            Self::Admin => "admin",
        }
    }

    /// Returns `true` for employees and admins.
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Employee | Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UserRole {
    type Error = ParseUserRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "employee" => Ok(Self::Employee),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseUserRoleError(value.to_owned())),
        }
    }
}

/// An encoded password hash in PHC string format.
///
/// `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps an already-encoded PHC string.
    #[must_use]
    pub fn from_phc(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Returns the PHC string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Validated fields for a user that has not been hashed or stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    email: EmailAddress,
    display_name: String,
    role: UserRole,
    client_id: Option<ClientId>,
}

impl UserProfile {
    /// Validates the role/tenant pairing and the display name.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::MissingTenant`] for a client user with
    /// no tenant, [`DirectoryDomainError::UnexpectedTenant`] for a staff user
    /// with one, or [`DirectoryDomainError::EmptyDisplayName`].
    pub fn new(
        email: EmailAddress,
        display_name: impl Into<String>,
        role: UserRole,
        client_id: Option<ClientId>,
    ) -> Result<Self, DirectoryDomainError> {
        let name = display_name.into().trim().to_owned();
        if name.is_empty() {
            return Err(DirectoryDomainError::EmptyDisplayName);
        }
        match (role, client_id) {
            (UserRole::Client, None) => return Err(DirectoryDomainError::MissingTenant),
            (UserRole::Employee | UserRole::Admin, Some(_)) => {
                return Err(DirectoryDomainError::UnexpectedTenant);
            }
            _ => {}
        }
        Ok(Self {
            email,
            display_name: name,
            role,
            client_id,
        })
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the tenant, if any.
    #[must_use]
    pub const fn client_id(&self) -> Option<ClientId> {
        self.client_id
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    display_name: String,
    role: UserRole,
    client_id: Option<ClientId>,
    password_hash: PasswordHash,
    active: bool,
    created_at: DateTime<Utc>,
}

impl User {
    /// Creates an active user from a validated profile and password hash.
    #[must_use]
    pub fn new(profile: UserProfile, password_hash: PasswordHash, clock: &impl Clock) -> Self {
        Self {
            id: UserId::new(),
            email: profile.email,
            display_name: profile.display_name,
            role: profile.role,
            client_id: profile.client_id,
            password_hash,
            active: true,
            created_at: clock.utc(),
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the login email.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns the tenant for client users.
    #[must_use]
    pub const fn client_id(&self) -> Option<ClientId> {
        self.client_id
    }

    /// Returns the stored password hash.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Returns `false` once the account has been deactivated.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Disables the account. Existing sessions stop resolving to an actor.
    pub const fn deactivate(&mut self) {
        self.active = false;
    }
}
