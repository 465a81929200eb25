//! Tenants, user accounts and credential checks.
//!
//! Passwords are stored as Argon2 hashes and every client-role user belongs
//! to exactly one tenant. The module follows the same hexagonal split as the
//! rest of the crate:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
