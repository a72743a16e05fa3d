//! Metric constants as configuration data
//!
//! Activity multipliers, goal calorie adjustments and macro splits are product
//! decisions rather than physiology, so they live here with their defaults and
//! can be overridden from the service configuration.

use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, MetricsResult};
use crate::records::{ActivityLevel, GoalType};

/// All tunable constants used by the metric computations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// TDEE multipliers per activity level
    pub activity_factors: ActivityFactors,
    /// Calories added to TDEE per goal
    pub calorie_adjustments: CalorieAdjustments,
    /// Macro percentages per goal
    pub macro_splits: MacroSplits,
}

impl MetricsConfig {
    /// Check that the settings can produce sensible targets
    pub fn validate(&self) -> MetricsResult<()> {
        let factors = &self.activity_factors;
        for (name, value) in [
            ("sedentary", factors.sedentary),
            ("lightly_active", factors.lightly_active),
            ("moderately_active", factors.moderately_active),
            ("very_active", factors.very_active),
            ("extremely_active", factors.extremely_active),
            ("fallback", factors.fallback),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(MetricsError::InvalidConfig(format!(
                    "activity factor {name} must be positive, got {value}"
                )));
            }
        }

        for (name, split) in [
            ("default", &self.macro_splits.default),
            ("weight_loss", &self.macro_splits.weight_loss),
            ("muscle_gain", &self.macro_splits.muscle_gain),
        ] {
            split.validate(name)?;
        }

        Ok(())
    }
}

/// Activity factor multipliers for TDEE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityFactors {
    pub sedentary: f64,
    pub lightly_active: f64,
    pub moderately_active: f64,
    pub very_active: f64,
    pub extremely_active: f64,
    /// Used when the activity level is missing or unrecognised
    pub fallback: f64,
}

impl Default for ActivityFactors {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            lightly_active: 1.375,
            moderately_active: 1.55,
            very_active: 1.725,
            extremely_active: 1.9,
            fallback: 1.2,
        }
    }
}

impl ActivityFactors {
    /// Multiplier for an activity level, or the fallback when unknown
    pub fn multiplier(&self, level: Option<ActivityLevel>) -> f64 {
        match level {
            Some(ActivityLevel::Sedentary) => self.sedentary,
            Some(ActivityLevel::LightlyActive) => self.lightly_active,
            Some(ActivityLevel::ModeratelyActive) => self.moderately_active,
            Some(ActivityLevel::VeryActive) => self.very_active,
            Some(ActivityLevel::ExtremelyActive) => self.extremely_active,
            None => self.fallback,
        }
    }
}

/// Daily calorie adjustment applied on top of TDEE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalorieAdjustments {
    pub weight_loss: f64,
    pub muscle_gain: f64,
    pub maintenance: f64,
}

impl Default for CalorieAdjustments {
    fn default() -> Self {
        Self {
            weight_loss: -500.0,
            muscle_gain: 300.0,
            maintenance: 0.0,
        }
    }
}

impl CalorieAdjustments {
    /// Adjustment for a goal; an unknown goal leaves TDEE unchanged
    pub fn for_goal(&self, goal: Option<GoalType>) -> f64 {
        match goal {
            Some(GoalType::WeightLoss) => self.weight_loss,
            Some(GoalType::MuscleGain) => self.muscle_gain,
            Some(GoalType::Maintenance) => self.maintenance,
            None => 0.0,
        }
    }
}

/// Share of daily calories per macronutrient, as fractions of 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl MacroSplit {
    fn validate(&self, name: &str) -> MetricsResult<()> {
        let parts = [self.protein, self.carbs, self.fats];
        if parts.iter().any(|p| !(p.is_finite() && *p >= 0.0)) {
            return Err(MetricsError::InvalidConfig(format!(
                "macro split {name} has a negative or non-finite share"
            )));
        }

        let total: f64 = parts.iter().sum();
        if (total - 1.0).abs() > 0.001 {
            return Err(MetricsError::InvalidConfig(format!(
                "macro split {name} sums to {total}, expected 1.0"
            )));
        }

        Ok(())
    }
}

/// Macro splits per goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroSplits {
    /// Used for maintenance and unknown goals
    pub default: MacroSplit,
    pub weight_loss: MacroSplit,
    pub muscle_gain: MacroSplit,
}

impl Default for MacroSplits {
    fn default() -> Self {
        Self {
            default: MacroSplit {
                protein: 0.30,
                carbs: 0.40,
                fats: 0.30,
            },
            weight_loss: MacroSplit {
                protein: 0.35,
                carbs: 0.30,
                fats: 0.35,
            },
            muscle_gain: MacroSplit {
                protein: 0.35,
                carbs: 0.45,
                fats: 0.20,
            },
        }
    }
}

impl MacroSplits {
    pub fn for_goal(&self, goal: Option<GoalType>) -> MacroSplit {
        match goal {
            Some(GoalType::WeightLoss) => self.weight_loss,
            Some(GoalType::MuscleGain) => self.muscle_gain,
            Some(GoalType::Maintenance) | None => self.default,
        }
    }
}
