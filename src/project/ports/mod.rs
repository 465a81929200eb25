//! Port definitions for project persistence.

pub mod repository;

pub use repository::{
    ProjectFilter, ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult,
};
