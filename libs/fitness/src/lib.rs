//! Derived fitness metrics for the FitTrack application
//!
//! This crate holds the domain records shared by the services and the pure
//! computations performed over them: BMI and daily calorie/macro targets,
//! nutrition day aggregation, and body measurement progress analysis.
//!
//! Nothing here touches storage or holds state. Every function takes its
//! inputs (records, the reference time, the metric constants) as arguments,
//! so calling it twice with the same arguments gives the same result.

pub mod config;
pub mod error;
pub mod nutrition;
pub mod profile;
pub mod progress;
pub mod records;

pub use config::MetricsConfig;
pub use error::{MetricsError, MetricsResult};
pub use nutrition::{DailyTargets, DailyTotals, GoalComparison, compare_to_goal, daily_totals};
pub use profile::{
    BmiCategory, MacroTargets, ProfileTargets, UserProfile, compute_bmi, compute_calorie_goal,
    compute_macros, recommend_targets,
};
pub use progress::{ProgressAnalysis, ProgressReport, analyze};
pub use records::{ActivityLevel, BodyMeasurement, Gender, GoalType, MealType, NutritionLog};
