//! Profile endpoints

use axum::{Extension, Json, extract::State};
use axum_extra::extract::WithRejection;
use fitness::recommend_targets;

use crate::{
    error::{ApiError, ApiResult, internal},
    middleware::AuthUser,
    models::{Profile, ProfileResponse, UpdateProfileRequest},
    state::AppState,
};

fn with_targets(state: &AppState, profile: Profile) -> ProfileResponse {
    let targets = recommend_targets(&profile.metrics_profile(), &state.metrics);
    ProfileResponse::new(profile, targets)
}

/// Get the caller's profile with BMI and recommended targets
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = state
        .profile_repository
        .find(user.id)
        .await
        .map_err(internal("Failed to fetch profile"))?
        .ok_or(ApiError::NotFound("User not found"))?;

    Ok(Json(with_targets(&state, profile)))
}

/// Update profile fields and return the recomputed metrics
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateProfileRequest>, ApiError>,
) -> ApiResult<Json<ProfileResponse>> {
    let changes = payload.validate()?;

    let profile = state
        .profile_repository
        .update(user.id, &changes)
        .await
        .map_err(internal("Failed to update profile"))?
        .ok_or(ApiError::NotFound("User not found"))?;

    tracing::info!("Updated profile of {}", user.email);
    Ok(Json(with_targets(&state, profile)))
}
