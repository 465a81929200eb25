//! Argon2id implementation of the [`PasswordHasher`] port.

use argon2::password_hash::{self, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier as _, Version};

use crate::directory::{
    domain::PasswordHash,
    ports::{PasswordHasher, PasswordHashingError},
};

const SALT_LEN: usize = 16;

/// Argon2id password hasher with configurable cost.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Creates a hasher with the given memory cost (KiB) and iteration count.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashingError`] when the parameters are outside the
    /// ranges Argon2 accepts.
    pub fn with_cost(memory_kib: u32, iterations: u32) -> Result<Self, PasswordHashingError> {
        let params = Params::new(memory_kib, iterations, 1, None)
            .map_err(|err| PasswordHashingError(err.to_string()))?;
        Ok(Self {
            argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self {
            argon: Argon2::default(),
        }
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashingError> {
        let salt_bytes: [u8; SALT_LEN] = rand::random();
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|err| PasswordHashingError(err.to_string()))?;
        let encoded = self
            .argon
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHashingError(err.to_string()))?;
        Ok(PasswordHash::from_phc(encoded.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashingError> {
        let parsed = password_hash::PasswordHash::new(hash.as_str())
            .map_err(|err| PasswordHashingError(err.to_string()))?;
        match self.argon.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashingError(err.to_string())),
        }
    }
}
