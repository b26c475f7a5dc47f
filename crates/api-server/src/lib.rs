//! HTTP surface for the user profile service.
//!
//! Handlers only translate between the wire and `UserProfileService`; every
//! rule lives in the domain crate. Domain errors become status codes in
//! [`error::ApiError`].

use application::ProfileApp;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;

pub use error::ApiError;

/// Base path the profile routes are mounted under.
pub const API_BASE_PATH: &str = "/api/v1/demo";

#[derive(Clone)]
pub struct AppState {
    pub profile_app: Arc<ProfileApp>,
}

impl AppState {
    pub fn new(profile_app: ProfileApp) -> Self {
        Self {
            profile_app: Arc::new(profile_app),
        }
    }
}

/// Builds the full application router with middleware attached.
pub fn router(state: AppState) -> Router {
    let profile_routes = Router::new()
        .route("/users", post(handlers::create_user_profile))
        .route("/users/", get(handlers::list_user_profiles))
        .route(
            "/users/:username",
            get(handlers::get_user_profile)
                .patch(handlers::update_user_profile)
                .delete(handlers::delete_user_profile),
        );

    Router::new()
        .nest(API_BASE_PATH, profile_routes)
        .route("/health", get(handlers::health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Route table, logged at startup.
pub fn route_summary() -> Vec<String> {
    [
        ("GET   ", "/users/:username", "Get user by username"),
        ("GET   ", "/users/", "List all users"),
        ("POST  ", "/users", "Create a new user"),
        ("PATCH ", "/users/:username", "Replace one field of a user"),
        ("DELETE", "/users/:username", "Delete a user"),
    ]
    .iter()
    .map(|(method, path, summary)| format!("{} {}{:<20} - {}", method, API_BASE_PATH, path, summary))
    .chain(std::iter::once("GET    /health - Health check".to_string()))
    .collect()
}
