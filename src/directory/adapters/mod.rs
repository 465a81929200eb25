//! Adapter implementations for the directory ports.

pub mod memory;
pub mod password;

pub use memory::InMemoryDirectory;
pub use password::Argon2PasswordHasher;
