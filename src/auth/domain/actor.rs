//! The authenticated principal passed to every service operation.

use super::SessionClaims;
use crate::directory::domain::{ClientId, User, UserId, UserRole};
use serde::Serialize;

/// Who is making a request.
///
/// Built from verified session claims; services never see raw tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Actor {
    user_id: UserId,
    role: UserRole,
    client_id: Option<ClientId>,
}

impl Actor {
    /// Creates an actor from its parts.
    #[must_use]
    pub const fn new(user_id: UserId, role: UserRole, client_id: Option<ClientId>) -> Self {
        Self {
            user_id,
            role,
            client_id,
        }
    }

    /// Returns the acting user's identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the acting user's role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns the acting user's tenant, if a client user.
    #[must_use]
    pub const fn client_id(&self) -> Option<ClientId> {
        self.client_id
    }

    /// Returns `true` for employees and admins.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}

impl From<&SessionClaims> for Actor {
    fn from(claims: &SessionClaims) -> Self {
        Self::new(claims.user_id, claims.role, claims.client_id)
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self::new(user.id(), user.role(), user.client_id())
    }
}
