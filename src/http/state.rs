//! Shared state handed to every handler.

use std::sync::Arc;

use tracing::warn;

use crate::app::Services;
use crate::auth::services::{SessionCodec, SessionConfigError, SessionSecret};
use crate::clock::SharedClock;
use crate::config::PorticoConfig;

/// Services, session codec, clock and configuration behind cheap clones.
#[derive(Clone)]
pub struct AppState {
    /// Application services.
    pub services: Services,
    /// Signs and verifies session tokens.
    pub codec: Arc<SessionCodec>,
    /// Time source for session issue and expiry.
    pub clock: SharedClock,
    /// Effective configuration.
    pub config: Arc<PorticoConfig>,
}

impl AppState {
    /// Builds the state, deriving the session codec from `config`.
    ///
    /// Without a configured secret a random one is generated, so sessions do
    /// not outlive the process.
    ///
    /// # Errors
    ///
    /// Returns [`SessionConfigError`] when the secret or TTL is rejected.
    pub fn new(
        services: Services,
        config: PorticoConfig,
        clock: SharedClock,
    ) -> Result<Self, SessionConfigError> {
        let secret = match config.session.secret.as_deref() {
            Some(material) => SessionSecret::new(material.as_bytes())?,
            None => {
                warn!("no session secret configured; generated an ephemeral one");
                SessionSecret::generate()
            }
        };
        let codec = SessionCodec::new(&secret, config.session.ttl())?;
        Ok(Self {
            services,
            codec: Arc::new(codec),
            clock,
            config: Arc::new(config),
        })
    }

    /// Name of the session cookie.
    #[must_use]
    pub fn cookie_name(&self) -> &str {
        &self.config.session.cookie_name
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("codec", &self.codec)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
