//! HMAC-SHA256 session token codec.
//!
//! Tokens are `base64url(claims_json).base64url(hmac)`, unpadded. The
//! signature covers the encoded payload segment exactly as transmitted.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Duration;
use hmac::{Hmac, Mac};
use mockable::Clock;
use sha2::Sha256;
use std::fmt;
use thiserror::Error;

use crate::auth::domain::{SessionClaims, SessionError, SessionToken};
use crate::directory::domain::User;

type HmacSha256 = Hmac<Sha256>;

/// Minimum secret length in bytes.
pub const MIN_SECRET_BYTES: usize = 32;

/// Errors raised while configuring the codec.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionConfigError {
    /// The secret is shorter than [`MIN_SECRET_BYTES`].
    #[error("session secret must be at least {min} bytes, got {actual}")]
    SecretTooShort {
        /// Required length.
        min: usize,
        /// Supplied length.
        actual: usize,
    },
    /// The TTL is zero or negative.
    #[error("session ttl must be positive")]
    NonPositiveTtl,
}

/// Key material used to sign sessions. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionSecret(Vec<u8>);

impl SessionSecret {
    /// Wraps caller-supplied key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SessionConfigError::SecretTooShort`] for fewer than
    /// [`MIN_SECRET_BYTES`] bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, SessionConfigError> {
        let material = bytes.into();
        if material.len() < MIN_SECRET_BYTES {
            return Err(SessionConfigError::SecretTooShort {
                min: MIN_SECRET_BYTES,
                actual: material.len(),
            });
        }
        Ok(Self(material))
    }

    /// Generates a random secret that lives only as long as the process.
    #[must_use]
    pub fn generate() -> Self {
        let bytes: [u8; MIN_SECRET_BYTES] = rand::random();
        Self(bytes.to_vec())
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(<redacted>)")
    }
}

/// Issues and verifies signed session tokens.
#[derive(Clone)]
pub struct SessionCodec {
    mac: HmacSha256,
    ttl: Duration,
}

impl SessionCodec {
    /// Creates a codec for `secret` issuing tokens valid for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionConfigError::NonPositiveTtl`] when `ttl` is not
    /// positive.
    pub fn new(secret: &SessionSecret, ttl: Duration) -> Result<Self, SessionConfigError> {
        if ttl <= Duration::zero() {
            return Err(SessionConfigError::NonPositiveTtl);
        }
        // HMAC accepts keys of any length, so this cannot fail.
        let mac = <HmacSha256 as Mac>::new_from_slice(&secret.0)
            .map_err(|_| SessionConfigError::SecretTooShort {
                min: MIN_SECRET_BYTES,
                actual: secret.0.len(),
            })?;
        Ok(Self { mac, ttl })
    }

    /// Returns the configured lifetime of issued tokens.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for `user`, valid from now for the configured TTL.
    #[must_use]
    pub fn issue(&self, user: &User, clock: &impl Clock) -> (SessionToken, SessionClaims) {
        let claims = SessionClaims::for_user(user, clock.utc(), self.ttl);
        (self.encode(&claims), claims)
    }

    /// Signs arbitrary claims. Used by [`Self::issue`] and by tests that need
    /// a token with a specific expiry.
    #[must_use]
    pub fn encode(&self, claims: &SessionClaims) -> SessionToken {
        // Serialising a struct of UUIDs, enums and integers cannot fail.
        let json = serde_json::to_vec(claims).unwrap_or_default();
        let payload = URL_SAFE_NO_PAD.encode(json);
        let signature = URL_SAFE_NO_PAD.encode(self.sign(payload.as_bytes()));
        SessionToken::new(format!("{payload}.{signature}"))
    }

    /// Verifies a token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Malformed`] for a token that cannot be split
    /// or decoded, [`SessionError::BadSignature`] when the signature does not
    /// match and [`SessionError::Expired`] once the expiry has passed.
    pub fn verify(&self, token: &str, clock: &impl Clock) -> Result<SessionClaims, SessionError> {
        let (payload, signature) = token.trim().split_once('.').ok_or(SessionError::Malformed)?;
        if payload.is_empty() || signature.is_empty() || signature.contains('.') {
            return Err(SessionError::Malformed);
        }
        let signature_bytes = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| SessionError::Malformed)?;

        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature_bytes)
            .map_err(|_| SessionError::BadSignature)?;

        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| SessionError::Malformed)?;
        let claims: SessionClaims =
            serde_json::from_slice(&json).map_err(|_| SessionError::Malformed)?;

        if claims.is_expired_at(clock.utc()) {
            return Err(SessionError::Expired);
        }
        Ok(claims)
    }

    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

impl fmt::Debug for SessionCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCodec")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
