//! Signed sessions and role/tenant access control.
//!
//! The `session` cookie carries HMAC-signed [`domain::SessionClaims`],
//! verified by [`services::SessionCodec`]. Every role and tenant check goes
//! through [`domain::AccessPolicy`].

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
