//! Start-up configuration.
//!
//! Settings are read from a TOML file named by `PORTICO_CONFIG`, or
//! `portico.toml` in the working directory. A missing file means defaults;
//! a malformed one is an error. `PORTICO_BIND_ADDR` and
//! `PORTICO_SESSION_SECRET` override the file.

use crate::auth::services::MIN_SECRET_BYTES;
use crate::messaging::domain::MessagingLimits;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_VAR: &str = "PORTICO_CONFIG";
/// Environment variable overriding `server.bind_addr`.
pub const BIND_ADDR_VAR: &str = "PORTICO_BIND_ADDR";
/// Environment variable overriding `session.secret`.
pub const SESSION_SECRET_VAR: &str = "PORTICO_SESSION_SECRET";
/// File read when [`CONFIG_PATH_VAR`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "portico.toml";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// An environment override could not be parsed.
    #[error("{var} is not a valid socket address: {value}")]
    InvalidOverride {
        /// Variable name.
        var: &'static str,
        /// Rejected value.
        value: String,
    },
    /// A setting is out of range.
    #[error("invalid setting {key}: {reason}")]
    Invalid {
        /// Dotted setting name.
        key: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the server binds to.
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

/// Session cookie settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// HMAC key; generated per process when absent.
    pub secret: Option<String>,
    /// Session lifetime in minutes.
    pub ttl_minutes: u32,
    /// Name of the session cookie.
    pub cookie_name: String,
    /// Whether the cookie carries the `Secure` attribute.
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: None,
            ttl_minutes: 480,
            cookie_name: "session".to_owned(),
            secure_cookie: false,
        }
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("ttl_minutes", &self.ttl_minutes)
            .field("cookie_name", &self.cookie_name)
            .field("secure_cookie", &self.secure_cookie)
            .finish()
    }
}

impl SessionConfig {
    /// Returns the session lifetime.
    #[must_use]
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.ttl_minutes))
    }
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
        }
    }
}

/// Demo data settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Whether demo data is loaded at start-up.
    pub enabled: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub default_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_level: "info".to_owned(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PorticoConfig {
    /// HTTP listener.
    pub server: ServerConfig,
    /// Session cookies.
    pub session: SessionConfig,
    /// Password hashing cost.
    pub passwords: PasswordConfig,
    /// Messaging limits.
    pub messaging: MessagingLimits,
    /// Demo data.
    pub seed: SeedConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

impl PorticoConfig {
    /// Loads configuration using the process environment.
    ///
    /// # Errors
    ///
    /// See [`Self::load_with`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(&|key| std::env::var(key).ok())
    }

    /// Loads configuration, resolving variables through `env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`] for an
    /// unreadable file, [`ConfigError::InvalidOverride`] for a bad bind
    /// address override and [`ConfigError::Invalid`] when validation fails.
    pub fn load_with(env: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let path = env(CONFIG_PATH_VAR)
            .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, returning defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parses TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed input.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `PORTICO_BIND_ADDR` and `PORTICO_SESSION_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] for an unparsable address.
    pub fn apply_env_overrides(
        &mut self,
        env: &impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = env(BIND_ADDR_VAR) {
            self.server.bind_addr = value.parse().map_err(|_| ConfigError::InvalidOverride {
                var: BIND_ADDR_VAR,
                value,
            })?;
        }
        if let Some(secret) = env(SESSION_SECRET_VAR) {
            self.session.secret = Some(secret);
        }
        Ok(())
    }

    /// Checks ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a short secret, a zero TTL, a
    /// zero password cost or a zero messaging limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(secret) = &self.session.secret
            && secret.len() < MIN_SECRET_BYTES
        {
            return Err(ConfigError::Invalid {
                key: "session.secret",
                reason: format!("must be at least {MIN_SECRET_BYTES} bytes"),
            });
        }
        let zeroes = [
            ("session.ttl_minutes", self.session.ttl_minutes == 0),
            ("passwords.memory_kib", self.passwords.memory_kib == 0),
            ("passwords.iterations", self.passwords.iterations == 0),
            ("messaging.max_body_bytes", self.messaging.max_body_bytes == 0),
            ("messaging.max_subject_chars", self.messaging.max_subject_chars == 0),
        ];
        if let Some(&(key, _)) = zeroes.iter().find(|(_, zero)| *zero) {
            return Err(ConfigError::Invalid {
                key,
                reason: "must be greater than zero".to_owned(),
            });
        }
        if self.messaging.max_participants < 2 {
            return Err(ConfigError::Invalid {
                key: "messaging.max_participants",
                reason: "must allow at least two participants".to_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
