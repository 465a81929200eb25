//! Port trait definitions for the directory subsystem.

pub mod password;
pub mod repository;

pub use password::{PasswordHasher, PasswordHashingError};
pub use repository::{DirectoryRepository, DirectoryRepositoryError, DirectoryRepositoryResult};
