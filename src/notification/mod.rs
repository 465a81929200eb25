//! Per-user notifications raised by messaging and project activity.
//!
//! Other contexts depend only on the [`ports::NotificationSink`] port; the
//! [`services::NotificationService`] implements it by rendering per-kind
//! templates and storing the result.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
