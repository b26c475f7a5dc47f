use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use domain::{validate_username, PatchRequest, ProfilePayload, UserProfile};
use tracing::info;

pub const EMPTY_LIST_MESSAGE: &str = "No user profiles found in the database.";

pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserProfile>, ApiError> {
    validate_username(&username)?;
    let profile = state.profile_app.profile_service.get_profile(&username).await?;
    Ok(Json(profile))
}

pub async fn list_user_profiles(State(state): State<AppState>) -> Result<Response, ApiError> {
    let profiles = state.profile_app.profile_service.list_profiles().await?;
    if profiles.is_empty() {
        return Ok((StatusCode::OK, EMPTY_LIST_MESSAGE).into_response());
    }
    Ok(Json(profiles).into_response())
}

pub async fn create_user_profile(
    State(state): State<AppState>,
    payload: Result<Json<ProfilePayload>, JsonRejection>,
) -> Result<(StatusCode, String), ApiError> {
    let Json(payload) = payload?;
    let created = state
        .profile_app
        .profile_service
        .create_profile(&payload)
        .await?;

    info!("📥 Created user profile {} ({})", created.id, created.username);
    Ok((StatusCode::OK, created.to_string()))
}

pub async fn update_user_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    patch: Result<Json<PatchRequest>, JsonRejection>,
) -> Result<(StatusCode, String), ApiError> {
    let Json(patch) = patch?;
    let outcome = state
        .profile_app
        .profile_service
        .update_profile(&username, &patch)
        .await?;

    Ok((StatusCode::OK, outcome.to_string()))
}

pub async fn delete_user_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<StatusCode, ApiError> {
    validate_username(&username)?;
    state
        .profile_app
        .profile_service
        .delete_profile(&username)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
