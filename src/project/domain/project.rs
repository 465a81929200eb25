//! Project aggregate root.

use super::{Progress, ProjectDomainError, ProjectId, ProjectStatus};
use crate::directory::domain::{ClientId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Maximum project name length in characters.
pub const MAX_PROJECT_NAME_CHARS: usize = 120;

/// Validated project name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    /// Trims and validates a project name.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] or
    /// [`ProjectDomainError::NameTooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProjectDomainError::EmptyName);
        }
        if trimmed.chars().count() > MAX_PROJECT_NAME_CHARS {
            return Err(ProjectDomainError::NameTooLong {
                max: MAX_PROJECT_NAME_CHARS,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A client engagement tracked by the consultancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    client_id: ClientId,
    name: ProjectName,
    description: String,
    status: ProjectStatus,
    progress: Progress,
    budget_cents: Option<u64>,
    due_date: Option<NaiveDate>,
    team: Vec<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    revision: u64,
}

impl Project {
    /// Creates a project in [`ProjectStatus::Planning`] with no progress.
    #[must_use]
    pub fn new(
        client_id: ClientId,
        name: ProjectName,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ProjectId::new(),
            client_id,
            name,
            description: description.into().trim().to_owned(),
            status: ProjectStatus::Planning,
            progress: Progress::default(),
            budget_cents: None,
            due_date: None,
            team: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
            revision: 0,
        }
    }

    /// Sets the agreed budget.
    #[must_use]
    pub const fn with_budget_cents(mut self, cents: u64) -> Self {
        self.budget_cents = Some(cents);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the owning client.
    #[must_use]
    pub const fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the completion percentage.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns the budget in cents, if agreed.
    #[must_use]
    pub const fn budget_cents(&self) -> Option<u64> {
        self.budget_cents
    }

    /// Returns the due date, if set.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the assigned staff, in assignment order.
    #[must_use]
    pub fn team(&self) -> &[UserId] {
        &self.team
    }

    /// Returns `true` if the user is on the project team.
    #[must_use]
    pub fn has_member(&self, user_id: UserId) -> bool {
        self.team.contains(&user_id)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the stored revision. Repositories advance it on every update.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Advances the revision after a successful write.
    pub const fn advance_revision(&mut self) {
        self.revision += 1;
    }

    /// Moves the project to `target`, returning the previous status.
    ///
    /// Completing a project sets progress to 100.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidStatusTransition`] when the
    /// lifecycle does not allow the move.
    pub fn change_status(
        &mut self,
        target: ProjectStatus,
        clock: &impl Clock,
    ) -> Result<ProjectStatus, ProjectDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(ProjectDomainError::InvalidStatusTransition {
                from: self.status,
                to: target,
            });
        }
        let previous = self.status;
        self.status = target;
        if target == ProjectStatus::Completed {
            self.progress = Progress::COMPLETE;
        }
        self.touch(clock);
        Ok(previous)
    }

    /// Records a new completion percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::Closed`] once the project is completed
    /// or cancelled.
    pub fn update_progress(
        &mut self,
        progress: Progress,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        if self.status.is_terminal() {
            return Err(ProjectDomainError::Closed(self.status));
        }
        self.progress = progress;
        self.touch(clock);
        Ok(())
    }

    /// Adds a team member. Returns `false` if already on the team.
    pub fn assign_member(&mut self, user_id: UserId, clock: &impl Clock) -> bool {
        if self.has_member(user_id) {
            return false;
        }
        self.team.push(user_id);
        self.touch(clock);
        true
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
