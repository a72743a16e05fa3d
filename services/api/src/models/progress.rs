//! Body measurement payloads

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{error::ApiResult, validation::Validator};

/// Default look-back of the progress analysis, in days
pub const DEFAULT_ANALYSIS_DAYS: i64 = 30;
const MAX_ANALYSIS_DAYS: i64 = 3650;

/// Query parameters for listing measurements
#[derive(Debug, Default, Deserialize)]
pub struct MeasurementQuery {
    #[serde(alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(alias = "endDate")]
    pub end_date: Option<String>,
    pub limit: Option<i64>,
}

/// Query parameters for the progress analysis
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisQuery {
    pub days: Option<i64>,
}

impl AnalysisQuery {
    /// Requested window, defaulting to 30 days
    pub fn window_days(&self) -> ApiResult<i64> {
        let days = self.days.unwrap_or(DEFAULT_ANALYSIS_DAYS);
        Validator::new()
            .int_within("days", Some(days), 1, MAX_ANALYSIS_DAYS)
            .finish()?;
        Ok(days)
    }
}

/// Request for recording a measurement
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeasurementRequest {
    pub date: Option<String>,
    pub weight: f64,
    pub body_fat: Option<f64>,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub arms: Option<f64>,
    pub thighs: Option<f64>,
    pub notes: Option<String>,
}

/// Request for updating a measurement; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeasurementRequest {
    pub date: Option<String>,
    pub weight: Option<f64>,
    pub body_fat: Option<f64>,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub arms: Option<f64>,
    pub thighs: Option<f64>,
    pub notes: Option<String>,
}

/// Circumferences shared by create and update, in centimetres
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Circumferences {
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub arms: Option<f64>,
    pub thighs: Option<f64>,
}

impl Circumferences {
    fn check(&self, v: &mut Validator) {
        v.non_negative("chest", self.chest)
            .non_negative("waist", self.waist)
            .non_negative("hips", self.hips)
            .non_negative("arms", self.arms)
            .non_negative("thighs", self.thighs);
    }
}

/// Validated measurement ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeasurement {
    pub date: DateTime<Utc>,
    pub weight: f64,
    pub body_fat: Option<f64>,
    pub circumferences: Circumferences,
    pub notes: Option<String>,
}

/// Validated measurement update
#[derive(Debug, Default, PartialEq)]
pub struct MeasurementChanges {
    pub date: Option<DateTime<Utc>>,
    pub weight: Option<f64>,
    pub body_fat: Option<f64>,
    pub circumferences: Circumferences,
    pub notes: Option<String>,
}

impl CreateMeasurementRequest {
    /// Validate, defaulting the date to `now`
    pub fn validate(self, now: DateTime<Utc>) -> ApiResult<NewMeasurement> {
        let circumferences = Circumferences {
            chest: self.chest,
            waist: self.waist,
            hips: self.hips,
            arms: self.arms,
            thighs: self.thighs,
        };

        let mut v = Validator::new();
        v.non_negative("weight", Some(self.weight))
            .within("bodyFat", self.body_fat, 0.0, 100.0);
        circumferences.check(&mut v);
        let date = v.timestamp("date", self.date.as_deref());
        v.finish()?;

        Ok(NewMeasurement {
            date: date.unwrap_or(now),
            weight: self.weight,
            body_fat: self.body_fat,
            circumferences,
            notes: self.notes,
        })
    }
}

impl UpdateMeasurementRequest {
    pub fn validate(self) -> ApiResult<MeasurementChanges> {
        let circumferences = Circumferences {
            chest: self.chest,
            waist: self.waist,
            hips: self.hips,
            arms: self.arms,
            thighs: self.thighs,
        };

        let mut v = Validator::new();
        v.non_negative("weight", self.weight)
            .within("bodyFat", self.body_fat, 0.0, 100.0);
        circumferences.check(&mut v);
        let date = v.timestamp("date", self.date.as_deref());
        v.finish()?;

        Ok(MeasurementChanges {
            date,
            weight: self.weight,
            body_fat: self.body_fat,
            circumferences,
            notes: self.notes,
        })
    }
}

impl MeasurementQuery {
    /// Row cap, if any; must be positive
    pub fn limit(&self) -> ApiResult<Option<i64>> {
        Validator::new()
            .int_at_least("limit", self.limit, 1)
            .finish()?;
        Ok(self.limit)
    }
}
