//! Mapping of service errors onto HTTP responses.
//!
//! Every failure leaves the server as `{"error": {"code", "message"}}` with a
//! stable `code`. Persistence and other internal failures are logged and
//! answered with a generic message.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::auth::domain::{AccessDenied, SessionError};
use crate::directory::{ports::DirectoryRepositoryError, services::DirectoryServiceError};
use crate::messaging::{ports::MessagingRepositoryError, services::MessagingServiceError};
use crate::notification::{ports::NotificationRepositoryError, services::NotificationServiceError};
use crate::project::{
    domain::ProjectDomainError, ports::ProjectRepositoryError, services::ProjectServiceError,
};

/// Machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// 400: the request failed validation.
    InvalidRequest,
    /// 401: no valid session.
    Unauthenticated,
    /// 403: the actor may not do this.
    Forbidden,
    /// 404: no such resource, or not visible to the actor.
    NotFound,
    /// 409: duplicate or state conflict.
    Conflict,
    /// 500: something broke on our side.
    Internal,
}

impl ErrorCode {
    /// Returns the HTTP status for the code.
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// An error ready to be sent to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: ErrorCode,
    message: &'a str,
}

impl ApiError {
    /// Creates an error with an explicit code.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// 400 with `message`.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// 401 with a fixed message.
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::new(ErrorCode::Unauthenticated, "authentication required")
    }

    /// 403 with `message`.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// 404 with `message`.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// 409 with `message`.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Logs `detail` and returns a 500 that does not reveal it.
    #[must_use]
    pub fn internal(detail: &dyn std::error::Error) -> Self {
        error!(error = %detail, "request failed");
        Self::new(ErrorCode::Internal, "internal server error")
    }

    /// Returns the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Returns the client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let envelope = ErrorEnvelope {
            error: ErrorBody {
                code: self.code,
                message: &self.message,
            },
        };
        (self.code.status(), Json(envelope)).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(_: SessionError) -> Self {
        Self::unauthenticated()
    }
}

impl From<AccessDenied> for ApiError {
    fn from(err: AccessDenied) -> Self {
        Self::forbidden(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::invalid(rejection.body_text())
    }
}

impl From<DirectoryRepositoryError> for ApiError {
    fn from(err: DirectoryRepositoryError) -> Self {
        match err {
            DirectoryRepositoryError::DuplicateSlug(_)
            | DirectoryRepositoryError::DuplicateEmail(_) => Self::conflict(err.to_string()),
            DirectoryRepositoryError::UserNotFound(_) => Self::not_found(err.to_string()),
            DirectoryRepositoryError::Persistence(_) => Self::internal(&err),
        }
    }
}

impl From<DirectoryServiceError> for ApiError {
    fn from(err: DirectoryServiceError) -> Self {
        match err {
            DirectoryServiceError::Domain(_) | DirectoryServiceError::UnknownClient(_) => {
                Self::invalid(err.to_string())
            }
            DirectoryServiceError::Repository(inner) => inner.into(),
            DirectoryServiceError::Hashing(_) => Self::internal(&err),
            DirectoryServiceError::UnknownUser(_) => Self::not_found(err.to_string()),
            DirectoryServiceError::InvalidCredentials => {
                Self::new(ErrorCode::Unauthenticated, err.to_string())
            }
        }
    }
}

impl From<ProjectServiceError> for ApiError {
    fn from(err: ProjectServiceError) -> Self {
        match err {
            ProjectServiceError::Domain(
                ProjectDomainError::InvalidStatusTransition { .. } | ProjectDomainError::Closed(_),
            ) => Self::conflict(err.to_string()),
            ProjectServiceError::Domain(_)
            | ProjectServiceError::UnknownClient(_)
            | ProjectServiceError::InvalidMember(_) => Self::invalid(err.to_string()),
            ProjectServiceError::Repository(
                ProjectRepositoryError::DuplicateProject(_) | ProjectRepositoryError::Conflict(_),
            ) => Self::conflict(err.to_string()),
            ProjectServiceError::Repository(ProjectRepositoryError::NotFound(_))
            | ProjectServiceError::NotFound(_) => Self::not_found(err.to_string()),
            ProjectServiceError::Repository(ProjectRepositoryError::Persistence(_)) => {
                Self::internal(&err)
            }
            ProjectServiceError::Directory(inner) => inner.into(),
            ProjectServiceError::AccessDenied(inner) => inner.into(),
        }
    }
}

impl From<MessagingServiceError> for ApiError {
    fn from(err: MessagingServiceError) -> Self {
        match err {
            MessagingServiceError::Domain(_)
            | MessagingServiceError::Repository(MessagingRepositoryError::Rejected(_))
            | MessagingServiceError::UnknownParticipant(_) => Self::invalid(err.to_string()),
            MessagingServiceError::Repository(
                MessagingRepositoryError::DuplicateConversation(_),
            ) => Self::conflict(err.to_string()),
            MessagingServiceError::Repository(
                MessagingRepositoryError::ConversationNotFound(_),
            )
            | MessagingServiceError::ConversationNotFound(_) => Self::not_found(err.to_string()),
            MessagingServiceError::Repository(MessagingRepositoryError::Persistence(_)) => {
                Self::internal(&err)
            }
            MessagingServiceError::Directory(inner) => inner.into(),
            MessagingServiceError::AccessDenied(inner) => inner.into(),
        }
    }
}

impl From<NotificationServiceError> for ApiError {
    fn from(err: NotificationServiceError) -> Self {
        match err {
            NotificationServiceError::Repository(NotificationRepositoryError::Duplicate(_)) => {
                Self::conflict(err.to_string())
            }
            NotificationServiceError::Repository(NotificationRepositoryError::NotFound(_))
            | NotificationServiceError::NotFound(_) => Self::not_found(err.to_string()),
            NotificationServiceError::Repository(NotificationRepositoryError::Persistence(_))
            | NotificationServiceError::TemplateRender { .. } => Self::internal(&err),
        }
    }
}
