//! Employee portal endpoints.

use axum::{Json, extract::State};

use crate::http::{error::ApiError, session::CurrentActor, state::AppState};
use crate::project::domain::Project;

/// `GET /api/employee/workload`: projects the caller is staffed on.
///
/// # Errors
///
/// Returns 403 for client users.
pub async fn workload(
    State(state): State<AppState>,
    current: CurrentActor,
) -> Result<Json<Vec<Project>>, ApiError> {
    let assigned = state.services.projects.list_assigned(&current.actor).await?;
    Ok(Json(assigned))
}
