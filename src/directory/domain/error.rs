//! Error types for directory domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing directory domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryDomainError {
    /// The client name is empty after trimming.
    #[error("client name must not be empty")]
    EmptyClientName,

    /// The client name exceeds the 120-character limit.
    #[error("client name exceeds 120 character limit")]
    ClientNameTooLong,

    /// The slug is not lowercase kebab-case or has the wrong length.
    #[error("invalid client slug '{0}', expected 1-64 characters of [a-z0-9-]")]
    InvalidSlug(String),

    /// The email address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The display name is empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,

    /// The supplied password is shorter than the policy minimum.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length in characters.
        min: usize,
    },

    /// A client-role user was given without a tenant.
    #[error("client users must belong to a client organisation")]
    MissingTenant,

    /// A staff user was given a tenant.
    #[error("staff users cannot belong to a client organisation")]
    UnexpectedTenant,
}

/// Error returned while parsing a user role.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user role: {0}")]
pub struct ParseUserRoleError(pub String);
