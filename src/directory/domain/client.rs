//! Client organisation aggregate and its slug.

use super::{ClientId, DirectoryDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_SLUG_LENGTH: usize = 64;
const MAX_NAME_LENGTH: usize = 120;

/// URL-safe tenant handle, e.g. `northwind-traders`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientSlug(String);

impl ClientSlug {
    /// Creates a validated slug.
    ///
    /// The input is trimmed and lowercased. Only `[a-z0-9-]` is accepted and
    /// the slug may not start or end with a hyphen.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::InvalidSlug`] when the value does not
    /// satisfy these rules.
    pub fn new(value: impl Into<String>) -> Result<Self, DirectoryDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        let well_formed = !normalized.is_empty()
            && normalized.len() <= MAX_SLUG_LENGTH
            && !normalized.starts_with('-')
            && !normalized.ends_with('-')
            && normalized
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

        if !well_formed {
            return Err(DirectoryDomainError::InvalidSlug(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A consulting customer. Every client-role user belongs to exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    slug: ClientSlug,
    name: String,
    created_at: DateTime<Utc>,
}

impl Client {
    /// Creates a new client organisation.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyClientName`] or
    /// [`DirectoryDomainError::ClientNameTooLong`] when the name is unusable.
    pub fn new(
        name: impl Into<String>,
        slug: ClientSlug,
        clock: &impl Clock,
    ) -> Result<Self, DirectoryDomainError> {
        let trimmed = name.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(DirectoryDomainError::EmptyClientName);
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(DirectoryDomainError::ClientNameTooLong);
        }
        Ok(Self {
            id: ClientId::new(),
            slug,
            name: trimmed,
            created_at: clock.utc(),
        })
    }

    /// Returns the client identifier.
    #[must_use]
    pub const fn id(&self) -> ClientId {
        self.id
    }

    /// Returns the client slug.
    #[must_use]
    pub const fn slug(&self) -> &ClientSlug {
        &self.slug
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
