//! Domain types for sessions and authorization.

mod actor;
mod claims;
mod error;
mod policy;

pub use actor::Actor;
pub use claims::{SessionClaims, SessionToken};
pub use error::{AccessDenied, SessionError};
pub use policy::{AccessPolicy, PortalArea};
