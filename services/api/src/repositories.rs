//! Repositories for database operations
//!
//! Every query is scoped by the owning user id, so a record belonging to
//! someone else behaves exactly like a missing one.

pub mod goal;
pub mod measurement;
pub mod nutrition;
pub mod profile;
pub mod workout;

pub use goal::GoalRepository;
pub use measurement::MeasurementRepository;
pub use nutrition::NutritionRepository;
pub use profile::ProfileRepository;
pub use workout::WorkoutRepository;

use std::str::FromStr;

/// Parse an optional enum column, treating unrecognised values as absent
fn parse_optional<T: FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|s| s.parse().ok())
}
