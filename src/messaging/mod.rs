//! Conversations between client users and staff, with per-user read state.
//!
//! Only participants can see a conversation; anyone else is told it does not
//! exist. Messages are numbered per conversation starting at 1, and a user's
//! unread count is the distance between the latest sequence and their read
//! marker.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
