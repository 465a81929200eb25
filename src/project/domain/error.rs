//! Error types for project domain validation.

use super::ProjectStatus;
use thiserror::Error;

/// Errors returned while constructing or mutating projects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectDomainError {
    /// The project name is blank after trimming.
    #[error("project name must not be empty")]
    EmptyName,

    /// The project name exceeds the allowed length.
    #[error("project name must be at most {max} characters")]
    NameTooLong {
        /// Maximum permitted characters.
        max: usize,
    },

    /// Progress must be a percentage.
    #[error("progress must be between 0 and 100, got {0}")]
    InvalidProgress(u8),

    /// The requested status change is not allowed.
    #[error("cannot move project from {from} to {to}")]
    InvalidStatusTransition {
        /// Current status.
        from: ProjectStatus,
        /// Requested status.
        to: ProjectStatus,
    },

    /// The project is completed or cancelled.
    #[error("project is {0} and can no longer change")]
    Closed(ProjectStatus),
}

/// Error returned when parsing a project status fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown project status: {0}")]
pub struct ParseProjectStatusError(pub String);
