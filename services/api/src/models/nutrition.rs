//! Nutrition log payloads

use chrono::{DateTime, NaiveDate, Utc};
use fitness::{DailyTotals, GoalComparison, MealType};
use serde::{Deserialize, Serialize};

use crate::{error::ApiResult, validation::Validator};

/// Query parameters for listing nutrition logs
#[derive(Debug, Default, Deserialize)]
pub struct NutritionQuery {
    #[serde(alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(alias = "endDate")]
    pub end_date: Option<String>,
    #[serde(alias = "mealType")]
    pub meal_type: Option<MealType>,
}

/// Query parameters for the daily totals endpoint
#[derive(Debug, Default, Deserialize)]
pub struct DailyTotalsQuery {
    pub date: Option<NaiveDate>,
}

/// One day of eating, optionally measured against the active goal
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotalsResponse {
    pub date: NaiveDate,
    pub totals: DailyTotals,
    pub meals: usize,
    pub goal: Option<GoalComparison>,
}

/// Request for logging a meal
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNutritionRequest {
    pub date: Option<String>,
    pub meal_type: MealType,
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Request for updating a meal; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNutritionRequest {
    pub date: Option<String>,
    pub meal_type: Option<MealType>,
    pub food_name: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
}

/// Validated nutrition log ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewNutritionLog {
    pub date: DateTime<Utc>,
    pub meal_type: MealType,
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Validated nutrition log update
#[derive(Debug, Default, PartialEq)]
pub struct NutritionLogChanges {
    pub date: Option<DateTime<Utc>>,
    pub meal_type: Option<MealType>,
    pub food_name: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
}

impl CreateNutritionRequest {
    /// Validate, defaulting the date to `now`
    pub fn validate(self, now: DateTime<Utc>) -> ApiResult<NewNutritionLog> {
        let mut v = Validator::new();
        v.min_len("foodName", Some(&self.food_name), 1)
            .non_negative("calories", Some(self.calories))
            .non_negative("protein", Some(self.protein))
            .non_negative("carbs", Some(self.carbs))
            .non_negative("fats", Some(self.fats));
        let date = v.timestamp("date", self.date.as_deref());
        v.finish()?;

        Ok(NewNutritionLog {
            date: date.unwrap_or(now),
            meal_type: self.meal_type,
            food_name: self.food_name.trim().to_string(),
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fats: self.fats,
        })
    }
}

impl UpdateNutritionRequest {
    pub fn validate(self) -> ApiResult<NutritionLogChanges> {
        let mut v = Validator::new();
        v.min_len("foodName", self.food_name.as_deref(), 1)
            .non_negative("calories", self.calories)
            .non_negative("protein", self.protein)
            .non_negative("carbs", self.carbs)
            .non_negative("fats", self.fats);
        let date = v.timestamp("date", self.date.as_deref());
        v.finish()?;

        Ok(NutritionLogChanges {
            date,
            meal_type: self.meal_type,
            food_name: self.food_name.map(|name| name.trim().to_string()),
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fats: self.fats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_create_defaults_date_to_now() {
        let now = Utc.with_ymd_and_hms(2024, 5, 12, 12, 0, 0).unwrap();
        let request: CreateNutritionRequest = serde_json::from_str(
            r#"{"mealType":"Lunch","foodName":"Salad","calories":350,"protein":12,"carbs":30,"fats":18}"#,
        )
        .unwrap();

        let log = request.validate(now).unwrap();
        assert_eq!(log.date, now);
        assert_eq!(log.meal_type, MealType::Lunch);
    }

    #[test]
    fn test_create_rejects_negative_macros_and_empty_name() {
        let request: CreateNutritionRequest = serde_json::from_str(
            r#"{"mealType":"Snack","foodName":" ","calories":-1,"protein":0,"carbs":0,"fats":-2}"#,
        )
        .unwrap();

        match request.validate(Utc::now()) {
            Err(crate::error::ApiError::Validation(details)) => {
                assert_eq!(
                    details,
                    vec!["foodName is required", "calories must be >= 0", "fats must be >= 0"]
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_meal_type_is_case_sensitive() {
        assert!(
            serde_json::from_str::<CreateNutritionRequest>(
                r#"{"mealType":"lunch","foodName":"Salad","calories":1,"protein":1,"carbs":1,"fats":1}"#,
            )
            .is_err()
        );
    }

    #[test]
    fn test_update_is_partial() {
        let changes = UpdateNutritionRequest {
            calories: Some(420.0),
            ..Default::default()
        }
        .validate()
        .unwrap();

        assert_eq!(changes.calories, Some(420.0));
        assert_eq!(changes.food_name, None);
        assert_eq!(changes.date, None);
    }
}
