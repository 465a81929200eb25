//! Response shapes for types that do not serialise themselves.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::directory::domain::{ClientId, User, UserId, UserRole};
use crate::project::domain::{Project, ProjectStatus};

/// A user account without its password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    /// Identifier.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Name shown to other users.
    pub display_name: String,
    /// Role.
    pub role: UserRole,
    /// Tenant of a client user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    /// Whether the account may sign in.
    pub active: bool,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            email: user.email().as_str().to_owned(),
            display_name: user.display_name().to_owned(),
            role: user.role(),
            client_id: user.client_id(),
            active: user.is_active(),
            created_at: user.created_at(),
        }
    }
}

/// Counts projects per status, listing every status even when empty.
#[must_use]
pub fn status_counts(projects: &[Project]) -> BTreeMap<&'static str, usize> {
    let mut counts: BTreeMap<&'static str, usize> = ProjectStatus::ALL
        .iter()
        .map(|status| (status.as_str(), 0))
        .collect();
    for project in projects {
        *counts.entry(project.status().as_str()).or_default() += 1;
    }
    counts
}
