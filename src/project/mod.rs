//! Client engagements: lifecycle, progress and team assignment.
//!
//! Every operation is scoped by the calling [`crate::auth::domain::Actor`].
//! Client users see only their tenant's projects; a project in another tenant
//! is reported as not found.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
