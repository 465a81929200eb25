//! Route handlers, grouped by the area they serve.

pub mod admin;
pub mod auth;
pub mod conversations;
pub mod employee;
pub mod health;
pub mod notifications;
pub mod portal;
pub mod projects;
