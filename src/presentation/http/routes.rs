use super::{
    handlers::{admin, health, profile, reactions, social, tracks, upload},
    middleware::admin::require_admin,
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{delete, get, patch, post, put},
};

pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/api/v1/admin/tracks/upload", post(upload::upload_track))
        .route(
            "/api/v1/admin/tracks/{id}",
            patch(tracks::update_track).delete(tracks::delete_track),
        )
        .route("/api/v1/admin/profile", put(profile::update_profile))
        .route(
            "/api/v1/admin/purchase-requests",
            get(admin::list_purchase_requests),
        )
        .route(
            "/api/v1/admin/purchase-requests/{id}",
            patch(admin::update_purchase_request),
        )
        .route("/api/v1/admin/comments/{id}", delete(admin::delete_comment))
        .route("/api/v1/admin/stats", get(admin::get_stats))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Catalog
        .route("/api/v1/tracks", get(tracks::list_tracks))
        .route("/api/v1/tracks/{id}", get(tracks::get_track))
        // Reaction counter reconciliation
        .route(
            "/api/v1/tracks/{id}/reactions",
            patch(reactions::adjust_reactions),
        )
        // Social
        .route(
            "/api/v1/tracks/{id}/comments",
            post(social::add_comment).get(social::get_comments),
        )
        .route(
            "/api/v1/tracks/{id}/purchase-requests",
            post(social::create_purchase_request),
        )
        // Profile
        .route("/api/v1/profile", get(profile::get_profile))
        // Admin login (unprotected)
        .route("/api/v1/admin/login", post(admin::login))
        // Admin (protected by JWT middleware)
        .merge(admin_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
