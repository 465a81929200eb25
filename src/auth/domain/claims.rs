//! Signed session claims carried in the `session` cookie.

use crate::directory::domain::{ClientId, User, UserId, UserRole};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The payload of a session token.
///
/// Timestamps are serialised as Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Authenticated user.
    pub user_id: UserId,
    /// Role at the time of login.
    pub role: UserRole,
    /// Tenant for client users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    /// Issue time.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,
    /// Expiry time.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl SessionClaims {
    /// Builds claims for `user` valid for `ttl` from `now`.
    #[must_use]
    pub fn for_user(user: &User, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            user_id: user.id(),
            role: user.role(),
            client_id: user.client_id(),
            issued_at: now,
            expires_at: now + ttl,
        }
    }

    /// Returns `true` when `now` is at or past the expiry.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// An encoded, signed session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps an encoded token string.
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Returns the encoded token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token, returning the encoded string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}
