//! Password hashing port.

use crate::directory::domain::PasswordHash;
use thiserror::Error;

/// Failure while hashing or parsing a stored hash.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("password hashing failed: {0}")]
pub struct PasswordHashingError(pub String);

/// Hashes and verifies user passwords.
///
/// Hashing is CPU-bound; callers on an async runtime run it through
/// `spawn_blocking`.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produces a salted hash of `password`.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashingError`] if the underlying algorithm fails.
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashingError>;

    /// Checks `password` against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashingError`] when `hash` cannot be parsed. A
    /// wrong password is `Ok(false)`.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashingError>;
}
