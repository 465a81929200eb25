//! Session extraction and the area gates.
//!
//! [`CurrentActor`] verifies the signed session token from the cookie or an
//! `Authorization: Bearer` header. The gates run as route-layer middleware
//! and reject actors that may not enter the area before any handler runs.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use tracing::{debug, warn};

use super::{error::ApiError, extract::ApiPath, state::AppState};
use crate::auth::domain::{AccessPolicy, Actor, PortalArea, SessionClaims};
use crate::directory::domain::ClientId;

const BEARER_PREFIX: &str = "Bearer ";

/// The verified caller of a request.
#[derive(Debug, Clone)]
pub struct CurrentActor {
    /// The principal handed to services.
    pub actor: Actor,
    /// Claims carried by the session token.
    pub claims: SessionClaims,
}

impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(verified) = parts.extensions.get::<Self>() {
            return Ok(verified.clone());
        }
        let token = session_token(parts, state).ok_or_else(ApiError::unauthenticated)?;
        let claims = state.codec.verify(&token, &state.clock).inspect_err(|err| {
            debug!(error = %err, "rejected session token");
        })?;

        // Deactivating an account ends its outstanding sessions.
        let active = state
            .services
            .directory
            .find_user(claims.user_id)
            .await?
            .is_some_and(|user| user.is_active());
        if !active {
            warn!(user_id = %claims.user_id, "session for inactive or unknown user");
            return Err(ApiError::unauthenticated());
        }

        let current = Self {
            actor: Actor::from(&claims),
            claims,
        };
        parts.extensions.insert(current.clone());
        Ok(current)
    }
}

fn session_token(parts: &Parts, state: &AppState) -> Option<String> {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::to_owned);
    bearer.or_else(|| {
        CookieJar::from_headers(&parts.headers)
            .get(state.cookie_name())
            .map(|cookie| cookie.value().to_owned())
    })
}

async fn enter(
    state: &AppState,
    area: PortalArea,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();
    let current = CurrentActor::from_request_parts(&mut parts, state).await?;
    if let Err(denied) = AccessPolicy::require_area(&current.actor, area) {
        warn!(user_id = %current.actor.user_id(), ?area, "gate refused entry");
        return Err(denied.into());
    }
    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Admits staff and the client's own users to `/api/portal/clients/{client_id}`.
///
/// # Errors
///
/// Returns 401 without a valid session and 403 when the path names another
/// tenant.
pub async fn portal_gate(
    State(state): State<AppState>,
    ApiPath(client_id): ApiPath<ClientId>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    enter(&state, PortalArea::ClientPortal(client_id), request, next).await
}

/// Admits employees and admins.
///
/// # Errors
///
/// Returns 401 without a valid session and 403 for client users.
pub async fn staff_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    enter(&state, PortalArea::EmployeePortal, request, next).await
}

/// Admits admins only.
///
/// # Errors
///
/// Returns 401 without a valid session and 403 for everyone else.
pub async fn admin_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    enter(&state, PortalArea::AdminConsole, request, next).await
}
