//! Route table.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handlers::{admin, auth, conversations, employee, health, notifications, portal, projects},
    session::{admin_gate, portal_gate, staff_gate},
    state::AppState,
};

/// Builds the application router over `state`.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    let portal_routes = Router::new()
        .route("/projects", get(portal::projects))
        .route("/overview", get(portal::overview))
        .route_layer(from_fn_with_state(state.clone(), portal_gate));

    let employee_routes = Router::new()
        .route("/workload", get(employee::workload))
        .route_layer(from_fn_with_state(state.clone(), staff_gate));

    let admin_routes = Router::new()
        .route("/overview", get(admin::overview))
        .route("/users", get(admin::list_users).post(admin::register_user))
        .route("/users/{id}/deactivate", post(admin::deactivate_user))
        .route("/clients", get(admin::list_clients).post(admin::register_client))
        .route_layer(from_fn_with_state(state.clone(), admin_gate));

    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/projects", get(projects::list).post(projects::create))
        .route("/api/projects/{id}", get(projects::find))
        .route("/api/projects/{id}/status", post(projects::change_status))
        .route("/api/projects/{id}/progress", post(projects::update_progress))
        .route("/api/projects/{id}/members", post(projects::assign_member))
        .route(
            "/api/conversations",
            get(conversations::list).post(conversations::start),
        )
        .route("/api/conversations/{id}", get(conversations::get))
        .route(
            "/api/conversations/{id}/messages",
            get(conversations::messages).post(conversations::post),
        )
        .route("/api/conversations/{id}/read", post(conversations::mark_read))
        .route(
            "/api/conversations/{id}/participants",
            post(conversations::add_participant),
        )
        .route("/api/messages/unread-count", get(conversations::unread_count))
        .route("/api/notifications", get(notifications::list))
        .route("/api/notifications/read-all", post(notifications::mark_all_read))
        .route("/api/notifications/{id}/read", post(notifications::mark_read))
        .nest("/api/portal/clients/{client_id}", portal_routes)
        .nest("/api/employee", employee_routes)
        .nest("/api/admin", admin_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
