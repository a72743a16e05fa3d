//! Nutrition aggregation: daily totals and comparison against goal targets

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, MetricsResult};
use crate::records::NutritionLog;

/// Summed macros for one calendar day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub meal_count: usize,
}

/// Daily targets taken from a goal; unset targets are skipped when comparing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTargets {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
}

/// Consumption of one nutrient against its target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientProgress {
    pub consumed: f64,
    pub target: f64,
    /// Negative once the target is exceeded
    pub remaining: f64,
    /// Share of the target consumed, rounded to one decimal
    pub percent: f64,
}

/// Per-nutrient comparison of a day against the active goal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalComparison {
    pub calories: Option<NutrientProgress>,
    pub protein: Option<NutrientProgress>,
    pub carbs: Option<NutrientProgress>,
    pub fats: Option<NutrientProgress>,
}

/// First and last instant of `date` in `tz`, both inclusive, as UTC
///
/// Used to build the storage query; [`daily_totals`] applies the same window.
pub fn day_bounds<Tz: TimeZone>(
    date: NaiveDate,
    tz: &Tz,
) -> MetricsResult<(DateTime<Utc>, DateTime<Utc>)> {
    let start_of = |day: NaiveDate| {
        day.and_hms_opt(0, 0, 0)
            .and_then(|midnight| tz.from_local_datetime(&midnight).earliest())
            .map(|dt| dt.with_timezone(&Utc))
    };

    let start = start_of(date).ok_or(MetricsError::InvalidDay(date))?;
    let next_day = date.succ_opt().ok_or(MetricsError::InvalidDay(date))?;
    let next_start = start_of(next_day).ok_or(MetricsError::InvalidDay(next_day))?;

    Ok((start, next_start - Duration::milliseconds(1)))
}

/// Sum every log that falls on `date` in time zone `tz`
///
/// Logs on other days are ignored, so callers may pass a wider range than
/// the day itself. An empty day yields all-zero totals.
pub fn daily_totals<Tz: TimeZone>(logs: &[NutritionLog], date: NaiveDate, tz: &Tz) -> DailyTotals {
    logs.iter()
        .filter(|log| log.date.with_timezone(tz).date_naive() == date)
        .fold(DailyTotals::default(), |mut acc, log| {
            acc.calories += log.calories;
            acc.protein += log.protein;
            acc.carbs += log.carbs;
            acc.fats += log.fats;
            acc.meal_count += 1;
            acc
        })
}

fn progress(consumed: f64, target: Option<f64>) -> Option<NutrientProgress> {
    let target = target.filter(|t| t.is_finite() && *t > 0.0)?;

    Some(NutrientProgress {
        consumed,
        target,
        remaining: target - consumed,
        percent: (consumed / target * 1000.0).round() / 10.0,
    })
}

/// Compare a day's totals against the targets that are set
pub fn compare_to_goal(totals: &DailyTotals, targets: &DailyTargets) -> GoalComparison {
    GoalComparison {
        calories: progress(totals.calories, targets.calories),
        protein: progress(totals.protein, targets.protein),
        carbs: progress(totals.carbs, targets.carbs),
        fats: progress(totals.fats, targets.fats),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::MealType;
    use chrono::FixedOffset;
    use uuid::Uuid;

    fn log_at(date: DateTime<Utc>, calories: f64, protein: f64, carbs: f64, fats: f64) -> NutritionLog {
        NutritionLog {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            date,
            meal_type: MealType::Lunch,
            food_name: "Chicken salad".to_string(),
            calories,
            protein,
            carbs,
            fats,
            created_at: date,
            updated_at: date,
        }
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_empty_day_is_all_zero() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let totals = daily_totals(&[], date, &Utc);
        assert_eq!(totals, DailyTotals::default());
        assert_eq!(totals.meal_count, 0);
    }

    #[test]
    fn test_same_day_logs_are_summed_and_other_days_excluded() {
        let logs = vec![
            log_at(utc(2024, 3, 10, 8, 0), 400.0, 20.0, 50.0, 10.0),
            log_at(utc(2024, 3, 10, 19, 30), 650.0, 45.0, 60.0, 22.5),
            log_at(utc(2024, 3, 11, 8, 0), 999.0, 99.0, 99.0, 99.0),
        ];

        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let totals = daily_totals(&logs, date, &Utc);

        assert_eq!(totals.calories, 1050.0);
        assert_eq!(totals.protein, 65.0);
        assert_eq!(totals.carbs, 110.0);
        assert_eq!(totals.fats, 32.5);
        assert_eq!(totals.meal_count, 2);
    }

    #[test]
    fn test_day_is_taken_in_the_given_time_zone() {
        // 23:30 UTC on the 9th is 01:30 on the 10th at UTC+2
        let logs = vec![log_at(utc(2024, 3, 9, 23, 30), 300.0, 10.0, 30.0, 5.0)];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        assert_eq!(daily_totals(&logs, date, &plus_two).meal_count, 1);
        assert_eq!(daily_totals(&logs, date, &Utc).meal_count, 0);
    }

    #[test]
    fn test_day_bounds_are_inclusive() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let (start, end) = day_bounds(date, &Utc).unwrap();

        assert_eq!(start, utc(2024, 3, 10, 0, 0));
        assert_eq!(end, utc(2024, 3, 11, 0, 0) - Duration::milliseconds(1));
    }

    #[test]
    fn test_compare_to_goal_skips_unset_targets() {
        let totals = DailyTotals {
            calories: 1500.0,
            protein: 120.0,
            carbs: 100.0,
            fats: 50.0,
            meal_count: 3,
        };
        let targets = DailyTargets {
            calories: Some(2000.0),
            protein: Some(100.0),
            carbs: None,
            fats: Some(0.0),
        };

        let comparison = compare_to_goal(&totals, &targets);

        let calories = comparison.calories.unwrap();
        assert_eq!(calories.remaining, 500.0);
        assert_eq!(calories.percent, 75.0);

        let protein = comparison.protein.unwrap();
        assert_eq!(protein.remaining, -20.0);
        assert_eq!(protein.percent, 120.0);

        assert!(comparison.carbs.is_none());
        assert!(comparison.fats.is_none());
    }
}
