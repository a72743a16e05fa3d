//! Goal payloads

use chrono::{DateTime, Utc};
use fitness::{DailyTargets, GoalType, ProfileTargets};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::ApiResult, validation::Validator};

/// Goal entity
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub target_weight: Option<f64>,
    pub target_date: Option<DateTime<Utc>>,
    pub daily_calories: Option<f64>,
    pub daily_protein: Option<f64>,
    pub daily_carbs: Option<f64>,
    pub daily_fats: Option<f64>,
    pub weekly_workouts: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Targets to compare a day of eating against
    pub fn daily_targets(&self) -> DailyTargets {
        DailyTargets {
            calories: self.daily_calories,
            protein: self.daily_protein,
            carbs: self.daily_carbs,
            fats: self.daily_fats,
        }
    }
}

/// Query parameters for listing goals
#[derive(Debug, Default, Deserialize)]
pub struct GoalsQuery {
    pub active: Option<bool>,
}

/// Request for goal creation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub target_weight: Option<f64>,
    pub target_date: Option<String>,
    pub daily_calories: Option<f64>,
    pub daily_protein: Option<f64>,
    pub daily_carbs: Option<f64>,
    pub daily_fats: Option<f64>,
    pub weekly_workouts: Option<i32>,
}

/// Request for goal update; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalRequest {
    #[serde(rename = "type")]
    pub goal_type: Option<GoalType>,
    pub target_weight: Option<f64>,
    pub target_date: Option<String>,
    pub daily_calories: Option<f64>,
    pub daily_protein: Option<f64>,
    pub daily_carbs: Option<f64>,
    pub daily_fats: Option<f64>,
    pub weekly_workouts: Option<i32>,
}

/// Validated goal ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub goal_type: GoalType,
    pub target_weight: Option<f64>,
    pub target_date: Option<DateTime<Utc>>,
    pub daily_calories: Option<f64>,
    pub daily_protein: Option<f64>,
    pub daily_carbs: Option<f64>,
    pub daily_fats: Option<f64>,
    pub weekly_workouts: Option<i32>,
}

/// Validated goal update
#[derive(Debug, Default, PartialEq)]
pub struct GoalChanges {
    pub goal_type: Option<GoalType>,
    pub target_weight: Option<f64>,
    pub target_date: Option<DateTime<Utc>>,
    pub daily_calories: Option<f64>,
    pub daily_protein: Option<f64>,
    pub daily_carbs: Option<f64>,
    pub daily_fats: Option<f64>,
    pub weekly_workouts: Option<i32>,
}

fn check_numbers(
    v: &mut Validator,
    target_weight: Option<f64>,
    daily: [Option<f64>; 4],
    weekly_workouts: Option<i32>,
) {
    v.non_negative("targetWeight", target_weight)
        .non_negative("dailyCalories", daily[0])
        .non_negative("dailyProtein", daily[1])
        .non_negative("dailyCarbs", daily[2])
        .non_negative("dailyFats", daily[3])
        .int_within("weeklyWorkouts", weekly_workouts.map(i64::from), 0, 14);
}

impl CreateGoalRequest {
    pub fn validate(self) -> ApiResult<NewGoal> {
        let mut v = Validator::new();
        check_numbers(
            &mut v,
            self.target_weight,
            [
                self.daily_calories,
                self.daily_protein,
                self.daily_carbs,
                self.daily_fats,
            ],
            self.weekly_workouts,
        );
        let target_date = v.timestamp("targetDate", self.target_date.as_deref());
        v.finish()?;

        Ok(NewGoal {
            goal_type: self.goal_type,
            target_weight: self.target_weight,
            target_date,
            daily_calories: self.daily_calories,
            daily_protein: self.daily_protein,
            daily_carbs: self.daily_carbs,
            daily_fats: self.daily_fats,
            weekly_workouts: self.weekly_workouts,
        })
    }
}

impl UpdateGoalRequest {
    pub fn validate(self) -> ApiResult<GoalChanges> {
        let mut v = Validator::new();
        check_numbers(
            &mut v,
            self.target_weight,
            [
                self.daily_calories,
                self.daily_protein,
                self.daily_carbs,
                self.daily_fats,
            ],
            self.weekly_workouts,
        );
        let target_date = v.timestamp("targetDate", self.target_date.as_deref());
        v.finish()?;

        Ok(GoalChanges {
            goal_type: self.goal_type,
            target_weight: self.target_weight,
            target_date,
            daily_calories: self.daily_calories,
            daily_protein: self.daily_protein,
            daily_carbs: self.daily_carbs,
            daily_fats: self.daily_fats,
            weekly_workouts: self.weekly_workouts,
        })
    }
}

impl NewGoal {
    /// Whether any daily nutrition target was left out
    pub fn is_missing_targets(&self) -> bool {
        self.daily_calories.is_none()
            || self.daily_protein.is_none()
            || self.daily_carbs.is_none()
            || self.daily_fats.is_none()
    }

    /// Fill the daily targets the client left out from computed ones
    ///
    /// Explicit values always win; nothing changes when the profile was too
    /// incomplete to produce a calorie goal.
    pub fn fill_missing_targets(&mut self, targets: &ProfileTargets) {
        if let Some(calories) = targets.daily_calories {
            self.daily_calories.get_or_insert(calories as f64);
        }
        if let Some(macros) = targets.macros {
            self.daily_protein.get_or_insert(macros.protein as f64);
            self.daily_carbs.get_or_insert(macros.carbs as f64);
            self.daily_fats.get_or_insert(macros.fats as f64);
        }
    }
}
