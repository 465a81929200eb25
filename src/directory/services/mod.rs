//! Orchestration services for the directory.

mod directory;

pub use directory::{
    DirectoryService, DirectoryServiceError, DirectoryServiceResult, MIN_PASSWORD_CHARS,
    RegisterUserRequest,
};
