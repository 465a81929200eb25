//! Client portal endpoints under `/api/portal/clients/{client_id}`.
//!
//! The portal gate has already checked the tenant before these run.

use std::collections::BTreeMap;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::directory::domain::{Client, ClientId};
use crate::http::{
    error::ApiError, extract::ApiPath, session::CurrentActor, state::AppState,
    views::status_counts,
};
use crate::project::domain::Project;

/// Tenant dashboard counters.
#[derive(Debug, Serialize)]
pub struct PortalOverview {
    /// The tenant.
    pub client: Client,
    /// Number of projects.
    pub projects: usize,
    /// Projects that are neither completed nor cancelled.
    pub open_projects: usize,
    /// Projects per status.
    pub projects_by_status: BTreeMap<&'static str, usize>,
    /// Unread messages of the caller.
    pub unread_messages: u64,
    /// Unread notifications of the caller.
    pub unread_notifications: usize,
}

/// `GET /api/portal/clients/{client_id}/projects`.
///
/// # Errors
///
/// Returns 403 when the caller belongs to another tenant.
pub async fn projects(
    State(state): State<AppState>,
    current: CurrentActor,
    ApiPath(client_id): ApiPath<ClientId>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let listing = state
        .services
        .projects
        .list_for_client(&current.actor, client_id)
        .await?;
    Ok(Json(listing))
}

/// `GET /api/portal/clients/{client_id}/overview`.
///
/// # Errors
///
/// Returns 404 for an unknown client and 403 when the caller belongs to
/// another tenant.
pub async fn overview(
    State(state): State<AppState>,
    current: CurrentActor,
    ApiPath(client_id): ApiPath<ClientId>,
) -> Result<Json<PortalOverview>, ApiError> {
    let services = &state.services;
    let client = services
        .directory
        .find_client(client_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("client not found: {client_id}")))?;
    let listing = services
        .projects
        .list_for_client(&current.actor, client_id)
        .await?;
    let unread_messages = services.messaging.unread_total(&current.actor).await?;
    let unread_notifications = services.notifications.unread_count(&current.actor).await?;

    Ok(Json(PortalOverview {
        client,
        projects: listing.len(),
        open_projects: listing
            .iter()
            .filter(|project| !project.status().is_terminal())
            .count(),
        projects_by_status: status_counts(&listing),
        unread_messages,
        unread_notifications,
    }))
}
