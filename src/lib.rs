//! Portico: back end for a consulting practice's client, employee and admin
//! portals.
//!
//! The crate is split into bounded contexts that follow hexagonal
//! architecture principles:
//!
//! - **Domain**: validated values and state machines with no I/O
//! - **Ports**: async traits for persistence and notification delivery
//! - **Adapters**: thread-safe in-memory implementations of the ports
//! - **Services**: authorization-aware orchestration over the ports
//!
//! # Modules
//!
//! - [`directory`]: client tenants, user accounts and credential checks
//! - [`auth`]: signed sessions and the access policy
//! - [`project`]: client engagements and their lifecycle
//! - [`messaging`]: conversations, ordered messages and read markers
//! - [`notification`]: per-user notifications rendered from templates
//! - [`seed`]: demo data loaded at start-up
//! - [`http`]: the axum router, session extractor and area gates
//! - [`app`], [`config`], [`telemetry`] and [`clock`]: process wiring

pub mod app;
pub mod auth;
pub mod clock;
pub mod config;
pub mod directory;
pub mod http;
pub mod messaging;
pub mod notification;
pub mod project;
pub mod seed;
pub mod telemetry;

#[cfg(test)]
mod fixtures;
