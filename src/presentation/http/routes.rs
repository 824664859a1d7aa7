//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::track_metrics;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(group_routes())
        .merge(invite_routes())
        .merge(user_routes())
}

/// Group, membership and nickname routes
fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/groups", post(handlers::group::create_group))
        .route(
            "/groups/{id}",
            get(handlers::group::get_group)
                .put(handlers::group::update_group)
                .delete(handlers::group::delete_group),
        )
        .route(
            "/groups/{id}/members",
            get(handlers::member::list_members)
                .post(handlers::member::add_member)
                .delete(handlers::member::remove_member),
        )
        .route(
            "/groups/{id}/members/nickname",
            put(handlers::member::set_nickname).delete(handlers::member::delete_nickname),
        )
        .route(
            "/groups/{id}/invites",
            post(handlers::invite::create_invite).get(handlers::invite::list_group_invites),
        )
}

/// Invite routes
fn invite_routes() -> Router<AppState> {
    Router::new()
        .route("/invites/{code}", get(handlers::invite::get_invite))
        .route("/invites/{code}/join", post(handlers::invite::join_invite))
        .route(
            "/invites/{code}/deactivate",
            delete(handlers::invite::deactivate_invite),
        )
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new().route("/users/{id}/groups", get(handlers::user::get_user_groups))
}
