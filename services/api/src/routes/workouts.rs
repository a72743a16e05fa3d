//! Workout endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult, internal},
    middleware::AuthUser,
    models::{
        CreateWorkoutRequest, DateRange, MessageResponse, UpdateWorkoutRequest, Workout,
        WorkoutQuery,
    },
    state::AppState,
};

pub async fn list_workouts(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Query(query), _): WithRejection<Query<WorkoutQuery>, ApiError>,
) -> ApiResult<Json<Vec<Workout>>> {
    let range = DateRange::parse(query.start_date.as_deref(), query.end_date.as_deref())?;

    let workouts = state
        .workout_repository
        .list(user.id, range)
        .await
        .map_err(internal("Failed to fetch workouts"))?;

    Ok(Json(workouts))
}

pub async fn get_workout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> ApiResult<Json<Workout>> {
    let workout = state
        .workout_repository
        .find(user.id, id)
        .await
        .map_err(internal("Failed to fetch workout"))?
        .ok_or(ApiError::NotFound("Workout not found"))?;

    Ok(Json(workout))
}

pub async fn create_workout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateWorkoutRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Workout>)> {
    let new_workout = payload.validate(Utc::now())?;

    let workout = state
        .workout_repository
        .create(user.id, &new_workout)
        .await
        .map_err(internal("Failed to create workout"))?;

    Ok((StatusCode::CREATED, Json(workout)))
}

pub async fn update_workout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateWorkoutRequest>, ApiError>,
) -> ApiResult<Json<Workout>> {
    let changes = payload.validate()?;

    let workout = state
        .workout_repository
        .update(user.id, id, &changes)
        .await
        .map_err(internal("Failed to update workout"))?
        .ok_or(ApiError::NotFound("Workout not found"))?;

    Ok(Json(workout))
}

pub async fn delete_workout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = state
        .workout_repository
        .delete(user.id, id)
        .await
        .map_err(internal("Failed to delete workout"))?;

    if !deleted {
        return Err(ApiError::NotFound("Workout not found"));
    }

    Ok(Json(MessageResponse {
        message: "Workout deleted successfully",
    }))
}
