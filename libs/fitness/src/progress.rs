//! Progress analysis over body measurements in a trailing window

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::records::BodyMeasurement;

/// Result of analysing a measurement window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProgressReport {
    /// Fewer than two measurements fell inside the window
    InsufficientData {
        message: String,
        measurements: usize,
    },
    Analysis(Box<ProgressAnalysis>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressAnalysis {
    pub period: Period,
    pub weight_change: WeightChange,
    pub body_fat_change: Option<BodyFatChange>,
    /// Number of measurements in the window
    pub measurements: usize,
    /// Every measurement in the window, oldest first
    pub data_points: Vec<BodyMeasurement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Whole days between first and latest measurement
    pub days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightChange {
    pub start: f64,
    pub current: f64,
    pub change: f64,
    /// Relative to the first weight; `None` when that weight is zero
    pub percent_change: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyFatChange {
    pub start: f64,
    pub current: f64,
    pub change: f64,
}

impl ProgressReport {
    pub fn is_insufficient(&self) -> bool {
        matches!(self, ProgressReport::InsufficientData { .. })
    }
}

/// Analyse the measurements taken within `window_days` before `now`
///
/// Input order does not matter. At least two measurements must fall in the
/// window, otherwise the report says so instead of failing.
pub fn analyze(
    measurements: &[BodyMeasurement],
    window_days: i64,
    now: DateTime<Utc>,
) -> ProgressReport {
    let cutoff = Duration::try_days(window_days)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let mut points: Vec<BodyMeasurement> = measurements
        .iter()
        .filter(|m| m.date >= cutoff)
        .cloned()
        .collect();
    points.sort_by_key(|m| m.date);

    let (first, latest) = match points.as_slice() {
        [first, .., latest] => (first, latest),
        _ => {
            return ProgressReport::InsufficientData {
                message: "Not enough data for analysis".to_string(),
                measurements: points.len(),
            };
        }
    };

    let change = latest.weight - first.weight;
    let weight_change = WeightChange {
        start: first.weight,
        current: latest.weight,
        change,
        percent_change: (first.weight > 0.0).then(|| change / first.weight * 100.0),
    };

    let body_fat_change = match (first.body_fat, latest.body_fat) {
        (Some(start), Some(current)) => Some(BodyFatChange {
            start,
            current,
            change: current - start,
        }),
        _ => None,
    };

    let period = Period {
        start: first.date,
        end: latest.date,
        days: (latest.date - first.date).num_days(),
    };

    ProgressReport::Analysis(Box::new(ProgressAnalysis {
        period,
        weight_change,
        body_fat_change,
        measurements: points.len(),
        data_points: points,
    }))
}
