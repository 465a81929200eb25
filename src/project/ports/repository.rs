//! Repository port for project persistence.

use crate::directory::domain::{ClientId, UserId};
use crate::project::domain::{Project, ProjectId, ProjectStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Optional constraints applied when listing projects.
///
/// Empty fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    /// Only projects of this client.
    pub client_id: Option<ClientId>,
    /// Only projects in this status.
    pub status: Option<ProjectStatus>,
    /// Only projects with this team member.
    pub member: Option<UserId>,
}

impl ProjectFilter {
    /// Returns a filter matching every project.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Restricts the filter to one client.
    #[must_use]
    pub const fn for_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Restricts the filter to one status.
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the filter to projects staffed by `member`.
    #[must_use]
    pub const fn with_member(mut self, member: UserId) -> Self {
        self.member = Some(member);
        self
    }

    /// Returns `true` when `project` satisfies every set constraint.
    #[must_use]
    pub fn matches(&self, project: &Project) -> bool {
        self.client_id.is_none_or(|id| project.client_id() == id)
            && self.status.is_none_or(|status| project.status() == status)
            && self.member.is_none_or(|member| project.has_member(member))
    }
}

/// Persistence contract for projects.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateProject`] when the
    /// identifier already exists.
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Persists changes to an existing project and returns the stored copy
    /// with its revision advanced.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist and [`ProjectRepositoryError::Conflict`] when `project` was read
    /// at an older revision than the stored one.
    async fn update(&self, project: &Project) -> ProjectRepositoryResult<Project>;

    /// Finds a project by identifier.
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns matching projects, most recently updated first.
    async fn list(&self, filter: ProjectFilter) -> ProjectRepositoryResult<Vec<Project>>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// A project with this identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// The project changed since it was read.
    #[error("project {0} was modified concurrently")]
    Conflict(ProjectId),

    /// Persistence failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
