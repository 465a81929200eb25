//! Services for client projects.

mod lifecycle;

pub use lifecycle::{
    CreateProjectRequest, ProjectService, ProjectServiceError, ProjectServiceResult,
};
