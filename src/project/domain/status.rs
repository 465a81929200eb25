//! Project lifecycle status and completion percentage.

use super::{ParseProjectStatusError, ProjectDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a client project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Scoping and proposal work.
    Planning,
    /// Delivery is under way.
    Active,
    /// Delivery is paused.
    OnHold,
    /// Delivered.
    Completed,
    /// Abandoned before delivery.
    Cancelled,
}

impl ProjectStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Planning,
        Self::Active,
        Self::OnHold,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::OnHold => "on_hold",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns `true` for states with no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns whether transition to `target` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Planning, Self::Active | Self::Cancelled)
                | (Self::Active, Self::OnHold | Self::Completed | Self::Cancelled)
                | (Self::OnHold, Self::Active | Self::Cancelled)
        )
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProjectStatus {
    type Error = ParseProjectStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "planning" => Ok(Self::Planning),
            "active" => Ok(Self::Active),
            "on_hold" => Ok(Self::OnHold),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseProjectStatusError(value.to_owned())),
        }
    }
}

/// Completion percentage, 0 to 100 inclusive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Progress(u8);

impl Progress {
    /// Fully complete.
    pub const COMPLETE: Self = Self(100);

    /// Validates a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidProgress`] above 100.
    pub const fn new(percent: u8) -> Result<Self, ProjectDomainError> {
        if percent > 100 {
            return Err(ProjectDomainError::InvalidProgress(percent));
        }
        Ok(Self(percent))
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Progress {
    type Error = ProjectDomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Progress> for u8 {
    fn from(value: Progress) -> Self {
        value.0
    }
}
