//! Body measurement and progress analysis endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Duration, Utc};
use fitness::{BodyMeasurement, ProgressReport, analyze};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult, internal},
    middleware::AuthUser,
    models::{
        AnalysisQuery, CreateMeasurementRequest, DateRange, MeasurementQuery, MessageResponse,
        UpdateMeasurementRequest,
    },
    state::AppState,
};

/// List measurements, newest first
pub async fn list_measurements(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Query(query), _): WithRejection<Query<MeasurementQuery>, ApiError>,
) -> ApiResult<Json<Vec<BodyMeasurement>>> {
    let range = DateRange::parse(query.start_date.as_deref(), query.end_date.as_deref())?;
    let limit = query.limit()?;

    let measurements = state
        .measurement_repository
        .list(user.id, range, limit)
        .await
        .map_err(internal("Failed to fetch measurements"))?;

    Ok(Json(measurements))
}

/// Most recent measurement
pub async fn latest_measurement(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<BodyMeasurement>> {
    let measurement = state
        .measurement_repository
        .latest(user.id)
        .await
        .map_err(internal("Failed to fetch latest measurement"))?
        .ok_or(ApiError::NotFound("No measurements found"))?;

    Ok(Json(measurement))
}

/// Weight and body fat change over the last `days` days
pub async fn analysis(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Query(query), _): WithRejection<Query<AnalysisQuery>, ApiError>,
) -> ApiResult<Json<ProgressReport>> {
    let days = query.window_days()?;
    let now = Utc::now();
    let cutoff = now
        .checked_sub_signed(Duration::days(days))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let measurements = state
        .measurement_repository
        .since(user.id, cutoff)
        .await
        .map_err(internal("Failed to analyze progress"))?;

    Ok(Json(analyze(&measurements, days, now)))
}

/// Record a measurement
pub async fn create_measurement(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateMeasurementRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<BodyMeasurement>)> {
    let new_measurement = payload.validate(Utc::now())?;

    let measurement = state
        .measurement_repository
        .create(user.id, &new_measurement)
        .await
        .map_err(internal("Failed to create measurement"))?;

    Ok((StatusCode::CREATED, Json(measurement)))
}

/// Update a measurement
pub async fn update_measurement(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateMeasurementRequest>, ApiError>,
) -> ApiResult<Json<BodyMeasurement>> {
    let changes = payload.validate()?;

    let measurement = state
        .measurement_repository
        .update(user.id, id, &changes)
        .await
        .map_err(internal("Failed to update measurement"))?
        .ok_or(ApiError::NotFound("Measurement not found"))?;

    Ok(Json(measurement))
}

/// Delete a measurement
pub async fn delete_measurement(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, ApiError>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = state
        .measurement_repository
        .delete(user.id, id)
        .await
        .map_err(internal("Failed to delete measurement"))?;

    if !deleted {
        return Err(ApiError::NotFound("Measurement not found"));
    }

    Ok(Json(MessageResponse {
        message: "Measurement deleted successfully",
    }))
}
