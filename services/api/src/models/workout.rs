//! Workout and exercise payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::ApiResult, validation::Validator};

/// Workout with its exercises in the order they were entered
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    /// Minutes
    pub duration: Option<i32>,
    pub exercises: Vec<Exercise>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: Uuid,
    pub workout_id: Uuid,
    pub name: String,
    pub sets: i32,
    pub reps: i32,
    /// Load in kilograms
    pub weight: Option<f64>,
    pub notes: Option<String>,
}

/// Query parameters for listing workouts
#[derive(Debug, Default, Deserialize)]
pub struct WorkoutQuery {
    #[serde(alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(alias = "endDate")]
    pub end_date: Option<String>,
}

/// Exercise as submitted by the client
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExerciseInput {
    pub name: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: Option<f64>,
    pub notes: Option<String>,
}

/// Request for workout creation
#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    pub name: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub duration: Option<i32>,
    pub exercises: Vec<ExerciseInput>,
}

/// Request for workout update; exercises, when present, replace the old set
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWorkoutRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub duration: Option<i32>,
    pub exercises: Option<Vec<ExerciseInput>>,
}

/// Validated workout ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub name: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub duration: Option<i32>,
    pub exercises: Vec<ExerciseInput>,
}

/// Validated workout update
#[derive(Debug, Default, PartialEq)]
pub struct WorkoutChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub duration: Option<i32>,
    pub exercises: Option<Vec<ExerciseInput>>,
}

fn check_exercises(v: &mut Validator, exercises: &[ExerciseInput]) {
    for (i, exercise) in exercises.iter().enumerate() {
        v.min_len(&format!("exercises[{}].name", i), Some(&exercise.name), 1)
            .int_at_least(&format!("exercises[{}].sets", i), Some(exercise.sets.into()), 1)
            .int_at_least(&format!("exercises[{}].reps", i), Some(exercise.reps.into()), 1)
            .non_negative(&format!("exercises[{}].weight", i), exercise.weight);
    }
}

fn trimmed(exercises: Vec<ExerciseInput>) -> Vec<ExerciseInput> {
    exercises
        .into_iter()
        .map(|e| ExerciseInput {
            name: e.name.trim().to_string(),
            ..e
        })
        .collect()
}

impl CreateWorkoutRequest {
    /// Validate, defaulting the date to `now`
    pub fn validate(self, now: DateTime<Utc>) -> ApiResult<NewWorkout> {
        let mut v = Validator::new();
        v.min_len("name", Some(&self.name), 1)
            .int_at_least("duration", self.duration.map(i64::from), 0)
            .check(
                !self.exercises.is_empty(),
                "At least one exercise is required",
            );
        check_exercises(&mut v, &self.exercises);
        let date = v.timestamp("date", self.date.as_deref());
        v.finish()?;

        Ok(NewWorkout {
            name: self.name.trim().to_string(),
            description: self.description,
            date: date.unwrap_or(now),
            duration: self.duration,
            exercises: trimmed(self.exercises),
        })
    }
}

impl UpdateWorkoutRequest {
    pub fn validate(self) -> ApiResult<WorkoutChanges> {
        let mut v = Validator::new();
        v.min_len("name", self.name.as_deref(), 1)
            .int_at_least("duration", self.duration.map(i64::from), 0);
        if let Some(exercises) = &self.exercises {
            v.check(!exercises.is_empty(), "At least one exercise is required");
            check_exercises(&mut v, exercises);
        }
        let date = v.timestamp("date", self.date.as_deref());
        v.finish()?;

        Ok(WorkoutChanges {
            name: self.name.map(|name| name.trim().to_string()),
            description: self.description,
            date,
            duration: self.duration,
            exercises: self.exercises.map(trimmed),
        })
    }
}
