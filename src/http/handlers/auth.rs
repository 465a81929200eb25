//! Sign-in, sign-out and the current profile.

use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::directory::domain::Client;
use crate::http::{
    error::ApiError, extract::ApiJson, session::CurrentActor, state::AppState, views::UserView,
};

/// Login form.
#[derive(Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Successful sign-in.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// The signed-in user.
    pub user: UserView,
    /// Session token, also set as the session cookie.
    pub token: String,
    /// When the session lapses.
    pub expires_at: DateTime<Utc>,
}

/// The caller's own profile.
#[derive(Debug, Serialize)]
pub struct Profile {
    /// The signed-in user.
    pub user: UserView,
    /// The user's tenant, for client users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,
    /// When the session lapses.
    pub session_expires_at: DateTime<Utc>,
}

/// `POST /api/auth/login`.
///
/// # Errors
///
/// Returns 401 for unknown emails, wrong passwords and deactivated accounts.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(credentials): ApiJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let user = state
        .services
        .directory
        .authenticate(&credentials.email, &credentials.password)
        .await?;
    let (token, claims) = state.codec.issue(&user, &state.clock);
    let cookie = Cookie::build((state.cookie_name().to_owned(), token.as_str().to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.session.secure_cookie);
    info!(user_id = %user.id(), role = %user.role(), "signed in");

    let response = LoginResponse {
        user: UserView::from(&user),
        token: token.into_inner(),
        expires_at: claims.expires_at,
    };
    Ok((jar.add(cookie), Json(response)))
}

/// `POST /api/auth/logout`.
///
/// Tokens are stateless, so this only clears the cookie.
#[expect(clippy::unused_async, reason = "axum handlers are async functions")]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let cookie = Cookie::build((state.cookie_name().to_owned(), "")).path("/");
    (jar.remove(cookie), StatusCode::NO_CONTENT)
}

/// `GET /api/auth/me`.
///
/// # Errors
///
/// Returns 401 without a valid session.
pub async fn me(
    State(state): State<AppState>,
    current: CurrentActor,
) -> Result<Json<Profile>, ApiError> {
    let directory = &state.services.directory;
    let user = directory
        .find_user(current.actor.user_id())
        .await?
        .ok_or_else(ApiError::unauthenticated)?;
    let client = match user.client_id() {
        Some(tenant) => directory.find_client(tenant).await?,
        None => None,
    };
    Ok(Json(Profile {
        user: UserView::from(&user),
        client,
        session_expires_at: current.claims.expires_at,
    }))
}
