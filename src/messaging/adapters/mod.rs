//! Adapter implementations for messaging ports.

pub mod memory;

pub use memory::InMemoryMessagingRepository;
