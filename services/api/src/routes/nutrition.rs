//! Nutrition log endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use chrono::{Local, Utc};
use fitness::{NutritionLog, compare_to_goal, daily_totals as sum_day, nutrition::day_bounds};
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult, internal},
    middleware::AuthUser,
    models::{
        CreateNutritionRequest, DailyTotalsQuery, DailyTotalsResponse, DateRange,
        MessageResponse, NutritionQuery, UpdateNutritionRequest,
    },
    state::AppState,
};

/// List logs, newest first
pub async fn list_logs(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Query(query), _): WithRejection<Query<NutritionQuery>, ApiError>,
) -> ApiResult<Json<Vec<NutritionLog>>> {
    let range = DateRange::parse(query.start_date.as_deref(), query.end_date.as_deref())?;

    let logs = state
        .nutrition_repository
        .list(user.id, range, query.meal_type)
        .await
        .map_err(internal("Failed to fetch nutrition logs"))?;

    Ok(Json(logs))
}

/// Totals for one local calendar day, compared with the active goal
pub async fn daily_totals(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Query(query), _): WithRejection<Query<DailyTotalsQuery>, ApiError>,
) -> ApiResult<Json<DailyTotalsResponse>> {
    let date = query.date.unwrap_or_else(|| Local::now().date_naive());
    let (start, end) = day_bounds(date, &Local).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    debug!("Daily totals for {} cover {} to {}", date, start, end);

    let logs = state
        .nutrition_repository
        .list_between(user.id, start, end)
        .await
        .map_err(internal("Failed to calculate daily totals"))?;
    let totals = sum_day(&logs, date, &Local);

    let active_goal = state
        .goal_repository
        .find_active(user.id)
        .await
        .map_err(internal("Failed to fetch active goal"))?;
    let goal = active_goal.map(|goal| compare_to_goal(&totals, &goal.daily_targets()));

    Ok(Json(DailyTotalsResponse {
        date,
        meals: totals.meal_count,
        totals,
        goal,
    }))
}

/// Log a meal
pub async fn create_log(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateNutritionRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<NutritionLog>)> {
    let new_log = payload.validate(Utc::now())?;

    let log = state
        .nutrition_repository
        .create(user.id, &new_log)
        .await
        .map_err(internal("Failed to create nutrition log"))?;

    Ok((StatusCode::CREATED, Json(log)))
}

/// Update a meal
pub async fn update_log(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateNutritionRequest>, ApiError>,
) -> ApiResult<Json<NutritionLog>> {
    let changes = payload.validate()?;

    let log = state
        .nutrition_repository
        .update(user.id, id, &changes)
        .await
        .map_err(internal("Failed to update nutrition log"))?
        .ok_or(ApiError::NotFound("Nutrition log not found"))?;

    Ok(Json(log))
}

/// Delete a meal
pub async fn delete_log(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = state
        .nutrition_repository
        .delete(user.id, id)
        .await
        .map_err(internal("Failed to delete nutrition log"))?;

    if !deleted {
        return Err(ApiError::NotFound("Nutrition log not found"));
    }

    Ok(Json(MessageResponse {
        message: "Nutrition log deleted successfully",
    }))
}
