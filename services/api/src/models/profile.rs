//! User profile payloads

use chrono::{DateTime, Utc};
use fitness::{ActivityLevel, BmiCategory, Gender, GoalType, ProfileTargets, UserProfile};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::ApiResult, validation::Validator};

/// Profile fields of the `users` row
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    /// Height in centimetres
    pub height: Option<f64>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub fitness_goal: Option<GoalType>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Biometrics in the shape the metric engine expects
    pub fn metrics_profile(&self) -> UserProfile {
        UserProfile {
            age: self.age.and_then(|age| u32::try_from(age).ok()),
            gender: self.gender,
            height_cm: self.height,
            weight_kg: self.weight,
            activity_level: self.activity_level,
            fitness_goal: self.fitness_goal,
        }
    }
}

/// Profile with the metrics derived from it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: Profile,
    pub bmi: Option<f64>,
    pub bmi_category: Option<BmiCategory>,
    pub targets: ProfileTargets,
}

impl ProfileResponse {
    pub fn new(profile: Profile, targets: ProfileTargets) -> Self {
        Self {
            profile,
            bmi: targets.bmi,
            bmi_category: targets.bmi_category,
            targets,
        }
    }
}

/// Request for profile update; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub fitness_goal: Option<GoalType>,
}

/// Validated profile update
#[derive(Debug, Default, PartialEq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub fitness_goal: Option<GoalType>,
}

impl UpdateProfileRequest {
    pub fn validate(self) -> ApiResult<ProfileChanges> {
        Validator::new()
            .min_len("name", self.name.as_deref(), 2)
            .int_within("age", self.age.map(i64::from), 1, 120)
            .non_negative("height", self.height)
            .non_negative("weight", self.weight)
            .finish()?;

        Ok(ProfileChanges {
            name: self.name.map(|name| name.trim().to_string()),
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
            activity_level: self.activity_level,
            fitness_goal: self.fitness_goal,
        })
    }
}
