//! Domain model for tenants and user accounts.
//!
//! A [`Client`] is a consulting customer and the unit of tenancy. Every
//! [`User`] has a [`UserRole`]; only client-role users carry a tenant.

mod client;
mod email;
mod error;
mod ids;
mod user;

pub use client::{Client, ClientSlug};
pub use email::EmailAddress;
pub use error::{DirectoryDomainError, ParseUserRoleError};
pub use ids::{ClientId, UserId};
pub use user::{PasswordHash, User, UserProfile, UserRole};
