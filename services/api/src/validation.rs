//! Request validation
//!
//! Handlers feed every field through a [`Validator`], which collects all
//! failures so a single 400 response can list them.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::ApiError;

/// Parse a client supplied timestamp
///
/// Accepts RFC 3339 (`2024-05-12T08:30:00Z`) or a bare date, which is read
/// as midnight UTC. Daily totals bucket by the server's local day, so on a
/// server west of UTC a bare-date entry counts toward the previous day.
/// Clients that care send a full timestamp with their offset.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD or RFC 3339", value))
}

/// Parse the upper bound of a date range
///
/// A bare date covers the whole day, so `end_date=2024-05-12` includes
/// entries logged that evening.
pub fn parse_range_end(value: &str) -> Result<DateTime<Utc>, String> {
    let value = value.trim();
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => date
            .succ_opt()
            .map(|next| next.and_time(NaiveTime::MIN).and_utc() - chrono::Duration::milliseconds(1))
            .ok_or_else(|| format!("invalid date '{}'", value)),
        Err(_) => parse_timestamp(value),
    }
}

/// Accumulates field errors
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, message: String) {
        self.errors.push(message);
    }

    /// Number must be finite and `>= 0`
    pub fn non_negative(&mut self, field: &str, value: Option<f64>) -> &mut Self {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                self.fail(format!("{} must be >= 0", field));
            }
        }
        self
    }

    /// Number must be finite and within `min..=max`
    pub fn within(&mut self, field: &str, value: Option<f64>, min: f64, max: f64) -> &mut Self {
        if let Some(v) = value {
            if !v.is_finite() || v < min || v > max {
                self.fail(format!("{} must be between {} and {}", field, min, max));
            }
        }
        self
    }

    /// Integer must be within `min..=max`
    pub fn int_within(&mut self, field: &str, value: Option<i64>, min: i64, max: i64) -> &mut Self {
        if let Some(v) = value {
            if v < min || v > max {
                self.fail(format!("{} must be between {} and {}", field, min, max));
            }
        }
        self
    }

    /// Integer must be at least `min`
    pub fn int_at_least(&mut self, field: &str, value: Option<i64>, min: i64) -> &mut Self {
        if let Some(v) = value {
            if v < min {
                self.fail(format!("{} must be at least {}", field, min));
            }
        }
        self
    }

    /// Trimmed text must have at least `min` characters
    pub fn min_len(&mut self, field: &str, value: Option<&str>, min: usize) -> &mut Self {
        if let Some(v) = value {
            if v.trim().chars().count() < min {
                if min == 1 {
                    self.fail(format!("{} is required", field));
                } else {
                    self.fail(format!("{} must be at least {} characters", field, min));
                }
            }
        }
        self
    }

    /// Record an arbitrary failed condition
    pub fn check(&mut self, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.fail(message.to_string());
        }
        self
    }

    /// Parse an optional timestamp field, recording a failure if malformed
    pub fn timestamp(&mut self, field: &str, value: Option<&str>) -> Option<DateTime<Utc>> {
        self.parse_with(field, value, parse_timestamp)
    }

    /// Parse an optional range end, recording a failure if malformed
    pub fn range_end(&mut self, field: &str, value: Option<&str>) -> Option<DateTime<Utc>> {
        self.parse_with(field, value, parse_range_end)
    }

    fn parse_with(
        &mut self,
        field: &str,
        value: Option<&str>,
        parse: fn(&str) -> Result<DateTime<Utc>, String>,
    ) -> Option<DateTime<Utc>> {
        match value.map(parse) {
            Some(Ok(dt)) => Some(dt),
            Some(Err(message)) => {
                self.fail(format!("{}: {}", field, message));
                None
            }
            None => None,
        }
    }

    /// Turn collected failures into a 400
    pub fn finish(&mut self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(std::mem::take(&mut self.errors)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use fitness::nutrition::day_bounds;

    #[test]
    fn test_parse_timestamp_formats() {
        assert_eq!(
            parse_timestamp("2024-05-12T08:30:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 12, 6, 30, 0).unwrap()
        );
        assert_eq!(
            parse_timestamp("2024-05-12").unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 12, 0, 0, 0).unwrap()
        );
        assert!(parse_timestamp("12/05/2024").is_err());
    }

    #[test]
    fn test_range_end_covers_the_whole_day() {
        let end = parse_range_end("2024-05-12").unwrap();
        assert_eq!(
            end,
            Utc.with_ymd_and_hms(2024, 5, 12, 23, 59, 59).unwrap()
                + chrono::Duration::milliseconds(999)
        );
        assert_eq!(
            parse_range_end("2024-05-12T10:00:00Z").unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 12, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_validator_collects_every_failure() {
        let mut v = Validator::new();
        v.non_negative("calories", Some(-1.0))
            .non_negative("protein", Some(0.0))
            .within("bodyFat", Some(101.0), 0.0, 100.0)
            .int_within("weeklyWorkouts", Some(15), 0, 14)
            .int_at_least("sets", Some(0), 1)
            .min_len("foodName", Some("  "), 1)
            .min_len("name", Some("A"), 2);
        let parsed = v.timestamp("date", Some("yesterday"));

        assert!(parsed.is_none());
        match v.finish() {
            Err(ApiError::Validation(details)) => {
                assert_eq!(details.len(), 7);
                assert_eq!(details[0], "calories must be >= 0");
                assert_eq!(details[4], "foodName is required");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validator_passes_absent_and_valid_values() {
        let mut v = Validator::new();
        v.non_negative("weight", None)
            .within("bodyFat", Some(18.5), 0.0, 100.0)
            .min_len("name", Some("Ana"), 2);
        assert!(v.timestamp("date", Some("2024-05-12")).is_some());
        assert!(v.finish().is_ok());
    }

    #[test]
    fn test_bare_date_is_utc_midnight_for_daily_buckets() {
        let logged = parse_timestamp("2024-05-12").unwrap();
        let may_11 = NaiveDate::from_ymd_opt(2024, 5, 11).unwrap();
        let may_12 = NaiveDate::from_ymd_opt(2024, 5, 12).unwrap();

        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        let (start, end) = day_bounds(may_11, &new_york).unwrap();
        assert!(start <= logged && logged <= end);

        let berlin = FixedOffset::east_opt(2 * 3600).unwrap();
        let (start, end) = day_bounds(may_12, &berlin).unwrap();
        assert!(start <= logged && logged <= end);

        // An explicit offset keeps the entry on the local day it was logged
        let evening = parse_timestamp("2024-05-12T19:00:00-05:00").unwrap();
        let (start, end) = day_bounds(may_12, &new_york).unwrap();
        assert!(start <= evening && evening <= end);
    }
}
