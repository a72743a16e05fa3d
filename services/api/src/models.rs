//! API models for request and response payloads
//!
//! JSON bodies use camelCase keys; query strings use snake_case with the
//! camelCase spelling accepted as an alias.

pub mod goal;
pub mod nutrition;
pub mod profile;
pub mod progress;
pub mod workout;

pub use goal::{CreateGoalRequest, Goal, GoalChanges, GoalsQuery, NewGoal, UpdateGoalRequest};
pub use nutrition::{
    CreateNutritionRequest, DailyTotalsQuery, DailyTotalsResponse, NewNutritionLog,
    NutritionLogChanges, NutritionQuery, UpdateNutritionRequest,
};
pub use profile::{Profile, ProfileChanges, ProfileResponse, UpdateProfileRequest};
pub use progress::{
    AnalysisQuery, CreateMeasurementRequest, MeasurementChanges, MeasurementQuery,
    NewMeasurement, UpdateMeasurementRequest,
};
pub use workout::{
    CreateWorkoutRequest, Exercise, ExerciseInput, NewWorkout, UpdateWorkoutRequest, Workout,
    WorkoutChanges, WorkoutQuery,
};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{error::ApiResult, validation::Validator};

/// Optional inclusive date window parsed from `start_date`/`end_date`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn parse(start: Option<&str>, end: Option<&str>) -> ApiResult<Self> {
        let mut v = Validator::new();
        let range = DateRange {
            start: v.timestamp("start_date", start),
            end: v.range_end("end_date", end),
        };
        if let (Some(start), Some(end)) = (range.start, range.end) {
            v.check(start <= end, "start_date must not be after end_date");
        }
        v.finish()?;
        Ok(range)
    }
}

/// Body returned by delete endpoints
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
