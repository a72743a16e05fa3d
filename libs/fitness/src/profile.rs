//! Profile and goal engine: BMI, daily calorie goal and macro targets

use serde::{Deserialize, Serialize};

use crate::config::MetricsConfig;
use crate::records::{ActivityLevel, Gender, GoalType};

const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;
const CARBS_KCAL_PER_GRAM: f64 = 4.0;
const FATS_KCAL_PER_GRAM: f64 = 9.0;

/// Biometrics the targets are computed from
///
/// Every field is optional since profiles are filled in gradually. Activity
/// level and goal are already interpreted: an unrecognised stored value is
/// `None` here and falls back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub fitness_goal: Option<GoalType>,
}

/// Daily macronutrient targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein: i64,
    pub carbs: i64,
    pub fats: i64,
}

/// WHO body mass index bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

/// Everything derivable from a profile; each part is `None` when the
/// profile lacks the inputs it needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileTargets {
    pub bmi: Option<f64>,
    pub bmi_category: Option<BmiCategory>,
    pub daily_calories: Option<i64>,
    pub macros: Option<MacroTargets>,
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Body mass index rounded to one decimal
///
/// Returns `None` unless both weight and height are positive.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if !is_positive(weight_kg) || !is_positive(height_cm) {
        return None;
    }

    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    Some((bmi * 10.0).round() / 10.0)
}

/// Basal metabolic rate via Mifflin-St Jeor
///
/// `10w + 6.25h - 5a + 5` for men, `-161` instead of `+5` otherwise.
pub fn mifflin_st_jeor(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female | Gender::Other => base - 161.0,
    }
}

/// Daily calorie goal: BMR times activity factor, adjusted for the goal
///
/// Unknown activity levels use the fallback multiplier and unknown goals
/// leave TDEE unchanged. Returns `None` unless weight and height are
/// positive.
pub fn compute_calorie_goal(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    activity: Option<ActivityLevel>,
    goal: Option<GoalType>,
    config: &MetricsConfig,
) -> Option<i64> {
    if !is_positive(weight_kg) || !is_positive(height_cm) {
        return None;
    }

    let bmr = mifflin_st_jeor(weight_kg, height_cm, age, gender);
    let tdee = bmr * config.activity_factors.multiplier(activity);
    let target = tdee + config.calorie_adjustments.for_goal(goal);

    Some(target.round() as i64)
}

/// Split a calorie budget into gram targets for the goal
pub fn compute_macros(calories: i64, goal: Option<GoalType>, config: &MetricsConfig) -> MacroTargets {
    let split = config.macro_splits.for_goal(goal);
    let calories = calories as f64;

    MacroTargets {
        protein: (calories * split.protein / PROTEIN_KCAL_PER_GRAM).round() as i64,
        carbs: (calories * split.carbs / CARBS_KCAL_PER_GRAM).round() as i64,
        fats: (calories * split.fats / FATS_KCAL_PER_GRAM).round() as i64,
    }
}

/// Compute every target the profile has enough data for
pub fn recommend_targets(profile: &UserProfile, config: &MetricsConfig) -> ProfileTargets {
    let bmi = profile
        .weight_kg
        .zip(profile.height_cm)
        .and_then(|(weight, height)| compute_bmi(weight, height));

    let daily_calories = match (
        profile.weight_kg,
        profile.height_cm,
        profile.age,
        profile.gender,
    ) {
        (Some(weight), Some(height), Some(age), Some(gender)) => compute_calorie_goal(
            weight,
            height,
            age,
            gender,
            profile.activity_level,
            profile.fitness_goal,
            config,
        ),
        _ => None,
    };

    ProfileTargets {
        bmi,
        bmi_category: bmi.map(BmiCategory::from_bmi),
        daily_calories,
        macros: daily_calories.map(|kcal| compute_macros(kcal, profile.fitness_goal, config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_rounds_to_one_decimal() {
        assert_eq!(compute_bmi(70.0, 175.0), Some(22.9));
        assert_eq!(compute_bmi(95.0, 180.0), Some(29.3));
    }

    #[test]
    fn test_bmi_undefined_for_non_positive_inputs() {
        assert_eq!(compute_bmi(0.0, 175.0), None);
        assert_eq!(compute_bmi(70.0, 0.0), None);
        assert_eq!(compute_bmi(-70.0, 175.0), None);
        assert_eq!(compute_bmi(f64::NAN, 175.0), None);
    }

    #[test]
    fn test_bmi_categories() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_mifflin_st_jeor_gender_offsets() {
        assert_eq!(mifflin_st_jeor(70.0, 175.0, 30, Gender::Male), 1648.75);
        assert_eq!(mifflin_st_jeor(70.0, 175.0, 30, Gender::Female), 1482.75);
        assert_eq!(mifflin_st_jeor(70.0, 175.0, 30, Gender::Other), 1482.75);
    }

    #[test]
    fn test_calorie_goal_for_moderately_active_weight_loss() {
        let config = MetricsConfig::default();
        // 1648.75 * 1.55 - 500 = 2055.5625
        let goal = compute_calorie_goal(
            70.0,
            175.0,
            30,
            Gender::Male,
            Some(ActivityLevel::ModeratelyActive),
            Some(GoalType::WeightLoss),
            &config,
        );
        assert_eq!(goal, Some(2056));
    }

    #[test]
    fn test_calorie_goal_adjustments_per_goal() {
        let config = MetricsConfig::default();
        let goal_for = |goal| {
            compute_calorie_goal(
                70.0,
                176.0,
                30,
                Gender::Male,
                Some(ActivityLevel::Sedentary),
                goal,
                &config,
            )
        };

        // 1655 * 1.2 = 1986
        assert_eq!(goal_for(Some(GoalType::Maintenance)), Some(1986));
        assert_eq!(goal_for(None), Some(1986));
        assert_eq!(goal_for(Some(GoalType::MuscleGain)), Some(2286));
        assert_eq!(goal_for(Some(GoalType::WeightLoss)), Some(1486));
    }

    #[test]
    fn test_unknown_activity_falls_back_to_sedentary_multiplier() {
        let config = MetricsConfig::default();
        let unknown = compute_calorie_goal(70.0, 175.0, 30, Gender::Male, None, None, &config);
        let sedentary = compute_calorie_goal(
            70.0,
            175.0,
            30,
            Gender::Male,
            Some(ActivityLevel::Sedentary),
            None,
            &config,
        );
        assert_eq!(unknown, sedentary);
    }

    #[test]
    fn test_calorie_goal_undefined_without_height() {
        let config = MetricsConfig::default();
        assert_eq!(
            compute_calorie_goal(70.0, 0.0, 30, Gender::Male, None, None, &config),
            None
        );
    }

    #[test]
    fn test_macros_for_maintenance() {
        let macros = compute_macros(2000, Some(GoalType::Maintenance), &MetricsConfig::default());
        assert_eq!(
            macros,
            MacroTargets {
                protein: 150,
                carbs: 200,
                fats: 67,
            }
        );
    }

    #[test]
    fn test_macros_for_muscle_gain_and_weight_loss() {
        let config = MetricsConfig::default();

        let gain = compute_macros(2500, Some(GoalType::MuscleGain), &config);
        assert_eq!((gain.protein, gain.carbs, gain.fats), (219, 281, 56));

        let loss = compute_macros(2000, Some(GoalType::WeightLoss), &config);
        assert_eq!((loss.protein, loss.carbs, loss.fats), (175, 150, 78));
    }

    #[test]
    fn test_recommend_targets_with_complete_profile() {
        let profile = UserProfile {
            age: Some(30),
            gender: Some(Gender::Male),
            height_cm: Some(175.0),
            weight_kg: Some(70.0),
            activity_level: Some(ActivityLevel::ModeratelyActive),
            fitness_goal: Some(GoalType::WeightLoss),
        };

        let targets = recommend_targets(&profile, &MetricsConfig::default());
        assert_eq!(targets.bmi, Some(22.9));
        assert_eq!(targets.bmi_category, Some(BmiCategory::Normal));
        assert_eq!(targets.daily_calories, Some(2056));
        assert!(targets.macros.is_some());
    }

    #[test]
    fn test_recommend_targets_with_partial_profile() {
        let profile = UserProfile {
            height_cm: Some(180.0),
            weight_kg: Some(80.0),
            ..Default::default()
        };

        let targets = recommend_targets(&profile, &MetricsConfig::default());
        assert_eq!(targets.bmi, Some(24.7));
        assert_eq!(targets.daily_calories, None);
        assert_eq!(targets.macros, None);
    }
}
