//! Application state shared across handlers

use common::jwt::JwtService;
use fitness::MetricsConfig;
use sqlx::PgPool;
use std::sync::Arc;

use crate::repositories::{
    GoalRepository, MeasurementRepository, NutritionRepository, ProfileRepository,
    WorkoutRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub jwt_service: JwtService,
    pub metrics: Arc<MetricsConfig>,
    pub profile_repository: ProfileRepository,
    pub goal_repository: GoalRepository,
    pub nutrition_repository: NutritionRepository,
    pub measurement_repository: MeasurementRepository,
    pub workout_repository: WorkoutRepository,
}

impl AppState {
    pub fn new(pool: PgPool, jwt_service: JwtService, metrics: MetricsConfig) -> Self {
        Self {
            jwt_service,
            metrics: Arc::new(metrics),
            profile_repository: ProfileRepository::new(pool.clone()),
            goal_repository: GoalRepository::new(pool.clone()),
            nutrition_repository: NutritionRepository::new(pool.clone()),
            measurement_repository: MeasurementRepository::new(pool.clone()),
            workout_repository: WorkoutRepository::new(pool),
        }
    }
}
