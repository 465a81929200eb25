//! Project listing and lifecycle endpoints.

use axum::{Json, extract::State, http::StatusCode};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::directory::domain::{ClientId, UserId};
use crate::http::{
    error::ApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    session::CurrentActor,
    state::AppState,
};
use crate::project::{
    domain::{Project, ProjectId, ProjectStatus},
    ports::ProjectFilter,
    services::CreateProjectRequest,
};

/// Filters accepted by `GET /api/projects`.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectQuery {
    /// Only projects in this status.
    pub status: Option<ProjectStatus>,
    /// Only projects of this client.
    pub client_id: Option<ClientId>,
}

/// Body of `POST /api/projects`.
#[derive(Debug, Deserialize)]
pub struct CreateProjectBody {
    /// Owning client.
    pub client_id: ClientId,
    /// Project name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Budget in cents.
    pub budget_cents: Option<u64>,
    /// Target delivery date.
    pub due_date: Option<NaiveDate>,
}

impl From<CreateProjectBody> for CreateProjectRequest {
    fn from(body: CreateProjectBody) -> Self {
        let mut request =
            Self::new(body.client_id, body.name).with_description(body.description);
        if let Some(cents) = body.budget_cents {
            request = request.with_budget_cents(cents);
        }
        if let Some(due) = body.due_date {
            request = request.with_due_date(due);
        }
        request
    }
}

/// Body of `POST /api/projects/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusChange {
    /// Target status.
    pub status: ProjectStatus,
}

/// Body of `POST /api/projects/{id}/progress`.
#[derive(Debug, Deserialize)]
pub struct ProgressUpdate {
    /// Completion percentage, 0 to 100.
    pub percent: u8,
}

/// Body of `POST /api/projects/{id}/members`.
#[derive(Debug, Deserialize)]
pub struct MemberAssignment {
    /// Staff member to add.
    pub user_id: UserId,
}

/// `GET /api/projects`.
///
/// # Errors
///
/// Returns 401 without a valid session.
pub async fn list(
    State(state): State<AppState>,
    current: CurrentActor,
    ApiQuery(query): ApiQuery<ProjectQuery>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let filter = ProjectFilter {
        client_id: query.client_id,
        status: query.status,
        member: None,
    };
    let projects = state
        .services
        .projects
        .list_visible(&current.actor, filter)
        .await?;
    Ok(Json(projects))
}

/// `POST /api/projects`.
///
/// # Errors
///
/// Returns 403 for client users and 400 for an invalid body or unknown
/// client.
pub async fn create(
    State(state): State<AppState>,
    current: CurrentActor,
    ApiJson(body): ApiJson<CreateProjectBody>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let project = state
        .services
        .projects
        .create(&current.actor, body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// `GET /api/projects/{id}`.
///
/// # Errors
///
/// Returns 404 when the project is missing or belongs to another tenant.
pub async fn find(
    State(state): State<AppState>,
    current: CurrentActor,
    ApiPath(id): ApiPath<ProjectId>,
) -> Result<Json<Project>, ApiError> {
    let project = state.services.projects.find(&current.actor, id).await?;
    Ok(Json(project))
}

/// `POST /api/projects/{id}/status`.
///
/// # Errors
///
/// Returns 403 for client users and 409 for a disallowed transition.
pub async fn change_status(
    State(state): State<AppState>,
    current: CurrentActor,
    ApiPath(id): ApiPath<ProjectId>,
    ApiJson(change): ApiJson<StatusChange>,
) -> Result<Json<Project>, ApiError> {
    let project = state
        .services
        .projects
        .change_status(&current.actor, id, change.status)
        .await?;
    Ok(Json(project))
}

/// `POST /api/projects/{id}/progress`.
///
/// # Errors
///
/// Returns 400 for a percentage over 100 and 409 for a closed project.
pub async fn update_progress(
    State(state): State<AppState>,
    current: CurrentActor,
    ApiPath(id): ApiPath<ProjectId>,
    ApiJson(update): ApiJson<ProgressUpdate>,
) -> Result<Json<Project>, ApiError> {
    let project = state
        .services
        .projects
        .update_progress(&current.actor, id, update.percent)
        .await?;
    Ok(Json(project))
}

/// `POST /api/projects/{id}/members`.
///
/// # Errors
///
/// Returns 400 when the user cannot join a project team.
pub async fn assign_member(
    State(state): State<AppState>,
    current: CurrentActor,
    ApiPath(id): ApiPath<ProjectId>,
    ApiJson(assignment): ApiJson<MemberAssignment>,
) -> Result<Json<Project>, ApiError> {
    let project = state
        .services
        .projects
        .assign_member(&current.actor, id, assignment.user_id)
        .await?;
    Ok(Json(project))
}
