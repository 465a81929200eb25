//! Adapter implementations for notification ports.

pub mod memory;

pub use memory::InMemoryNotificationRepository;
