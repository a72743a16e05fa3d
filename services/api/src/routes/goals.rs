//! Goal endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use fitness::recommend_targets;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult, internal},
    middleware::AuthUser,
    models::{CreateGoalRequest, Goal, GoalsQuery, MessageResponse, UpdateGoalRequest},
    state::AppState,
};

/// List the caller's goals, newest first
pub async fn list_goals(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Query(query), _): WithRejection<Query<GoalsQuery>, ApiError>,
) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state
        .goal_repository
        .list(user.id, query.active)
        .await
        .map_err(internal("Failed to fetch goals"))?;

    Ok(Json(goals))
}

/// Get the active goal
pub async fn get_active_goal(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Goal>> {
    let goal = state
        .goal_repository
        .find_active(user.id)
        .await
        .map_err(internal("Failed to fetch active goal"))?
        .ok_or(ApiError::NotFound("No active goal found"))?;

    Ok(Json(goal))
}

/// Create a goal, which becomes the only active one
///
/// Daily targets the client leaves out are computed from the profile, using
/// the new goal's type.
pub async fn create_goal(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateGoalRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let mut new_goal = payload.validate()?;

    if new_goal.is_missing_targets() {
        let profile = state
            .profile_repository
            .find(user.id)
            .await
            .map_err(internal("Failed to fetch profile"))?;

        if let Some(profile) = profile {
            let mut biometrics = profile.metrics_profile();
            biometrics.fitness_goal = Some(new_goal.goal_type);
            new_goal.fill_missing_targets(&recommend_targets(&biometrics, &state.metrics));
        }
    }

    let goal = state
        .goal_repository
        .create(user.id, &new_goal)
        .await
        .map_err(internal("Failed to create goal"))?;

    Ok((StatusCode::CREATED, Json(goal)))
}

/// Update a goal
pub async fn update_goal(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateGoalRequest>, ApiError>,
) -> ApiResult<Json<Goal>> {
    let changes = payload.validate()?;

    let goal = state
        .goal_repository
        .update(user.id, id, &changes)
        .await
        .map_err(internal("Failed to update goal"))?
        .ok_or(ApiError::NotFound("Goal not found"))?;

    Ok(Json(goal))
}

/// Delete a goal
pub async fn delete_goal(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = state
        .goal_repository
        .delete(user.id, id)
        .await
        .map_err(internal("Failed to delete goal"))?;

    if !deleted {
        return Err(ApiError::NotFound("Goal not found"));
    }

    Ok(Json(MessageResponse {
        message: "Goal deleted successfully",
    }))
}
