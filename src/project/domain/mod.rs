//! Domain types for client projects.

mod error;
mod ids;
mod project;
mod status;

pub use error::{ParseProjectStatusError, ProjectDomainError};
pub use ids::ProjectId;
pub use project::{MAX_PROJECT_NAME_CHARS, Project, ProjectName};
pub use status::{Progress, ProjectStatus};
