//! Pure authorization rules shared by the HTTP gate and the services.

use super::{AccessDenied, Actor};
use crate::directory::domain::{ClientId, UserRole};

/// A portal section gated by role and tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalArea {
    /// The client portal of one tenant.
    ClientPortal(ClientId),
    /// The employee portal.
    EmployeePortal,
    /// The admin/ERP console.
    AdminConsole,
}

/// Stateless authorization policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    /// Returns whether `actor` may enter `area`.
    ///
    /// Clients only reach their own tenant's portal, employees reach every
    /// client portal and the employee portal, admins reach everything.
    #[must_use]
    pub fn can_enter(actor: &Actor, area: PortalArea) -> bool {
        match (actor.role(), area) {
            (UserRole::Admin, _) => true,
            (UserRole::Employee, PortalArea::ClientPortal(_) | PortalArea::EmployeePortal) => true,
            (UserRole::Employee, PortalArea::AdminConsole) => false,
            (UserRole::Client, PortalArea::ClientPortal(tenant)) => {
                actor.client_id() == Some(tenant)
            }
            (UserRole::Client, PortalArea::EmployeePortal | PortalArea::AdminConsole) => false,
        }
    }

    /// Returns whether `actor` may see data belonging to `client_id`.
    #[must_use]
    pub fn can_view_client(actor: &Actor, client_id: ClientId) -> bool {
        Self::can_enter(actor, PortalArea::ClientPortal(client_id))
    }

    /// Like [`Self::can_enter`] but as a `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] when the actor may not enter.
    pub fn require_area(actor: &Actor, area: PortalArea) -> Result<(), AccessDenied> {
        if Self::can_enter(actor, area) {
            Ok(())
        } else {
            Err(AccessDenied::new(format!(
                "{} may not enter {area:?}",
                actor.role()
            )))
        }
    }

    /// Requires an employee or admin.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] for client users.
    pub fn require_staff(actor: &Actor) -> Result<(), AccessDenied> {
        Self::require_area(actor, PortalArea::EmployeePortal)
    }

    /// Requires an admin.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] for everyone else.
    pub fn require_admin(actor: &Actor) -> Result<(), AccessDenied> {
        Self::require_area(actor, PortalArea::AdminConsole)
    }
}
