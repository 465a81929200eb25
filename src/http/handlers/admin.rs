//! Admin console endpoints under `/api/admin`.

use std::collections::BTreeMap;

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::directory::{
    domain::{Client, ClientId, UserId, UserRole},
    services::RegisterUserRequest,
};
use crate::http::{
    error::ApiError,
    extract::{ApiJson, ApiPath},
    session::CurrentActor,
    state::AppState,
    views::{UserView, status_counts},
};

/// Company-wide counters.
#[derive(Debug, Serialize)]
pub struct AdminOverview {
    /// Client organisations.
    pub clients: usize,
    /// User accounts.
    pub users: usize,
    /// Accounts that may sign in.
    pub active_users: usize,
    /// Number of projects.
    pub projects: usize,
    /// Projects per status.
    pub projects_by_status: BTreeMap<&'static str, usize>,
    /// Conversations across all users.
    pub conversations: usize,
}

/// Body of `POST /api/admin/users`.
#[derive(Deserialize)]
pub struct NewUser {
    /// Login email.
    pub email: String,
    /// Name shown to other users.
    pub display_name: String,
    /// Role.
    pub role: UserRole,
    /// Initial password.
    pub password: String,
    /// Tenant, required for client users.
    #[serde(default)]
    pub client_id: Option<ClientId>,
}

/// Body of `POST /api/admin/clients`.
#[derive(Debug, Deserialize)]
pub struct NewClient {
    /// Organisation name.
    pub name: String,
    /// URL slug.
    pub slug: String,
}

/// `GET /api/admin/overview`.
///
/// # Errors
///
/// Returns 403 for non-admins.
pub async fn overview(
    State(state): State<AppState>,
    current: CurrentActor,
) -> Result<Json<AdminOverview>, ApiError> {
    let services = &state.services;
    let clients = services.directory.list_clients().await?;
    let users = services.directory.list_users().await?;
    let projects = services.projects.list_all(&current.actor).await?;
    let conversations = services.messaging.list_all(&current.actor).await?;

    Ok(Json(AdminOverview {
        clients: clients.len(),
        users: users.len(),
        active_users: users.iter().filter(|user| user.is_active()).count(),
        projects: projects.len(),
        projects_by_status: status_counts(&projects),
        conversations: conversations.len(),
    }))
}

/// `GET /api/admin/users`.
///
/// # Errors
///
/// Returns 403 for non-admins.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserView>>, ApiError> {
    let users = state.services.directory.list_users().await?;
    Ok(Json(users.iter().map(UserView::from).collect()))
}

/// `POST /api/admin/users`.
///
/// # Errors
///
/// Returns 400 for invalid fields and 409 for a taken email.
pub async fn register_user(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewUser>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let mut request =
        RegisterUserRequest::new(body.email, body.display_name, body.role, body.password);
    if let Some(tenant) = body.client_id {
        request = request.for_client(tenant);
    }
    let user = state.services.directory.register_user(request).await?;
    Ok((StatusCode::CREATED, Json(UserView::from(&user))))
}

/// `POST /api/admin/users/{id}/deactivate`.
///
/// # Errors
///
/// Returns 404 for an unknown user and 409 when admins target themselves.
pub async fn deactivate_user(
    State(state): State<AppState>,
    current: CurrentActor,
    ApiPath(id): ApiPath<UserId>,
) -> Result<Json<UserView>, ApiError> {
    if id == current.actor.user_id() {
        return Err(ApiError::conflict("cannot deactivate your own account"));
    }
    let user = state.services.directory.deactivate_user(id).await?;
    Ok(Json(UserView::from(&user)))
}

/// `GET /api/admin/clients`.
///
/// # Errors
///
/// Returns 403 for non-admins.
pub async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<Client>>, ApiError> {
    let clients = state.services.directory.list_clients().await?;
    Ok(Json(clients))
}

/// `POST /api/admin/clients`.
///
/// # Errors
///
/// Returns 400 for an invalid name or slug and 409 for a taken slug.
pub async fn register_client(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewClient>,
) -> Result<(StatusCode, Json<Client>), ApiError> {
    let client = state
        .services
        .directory
        .register_client(&body.name, &body.slug)
        .await?;
    Ok((StatusCode::CREATED, Json(client)))
}
