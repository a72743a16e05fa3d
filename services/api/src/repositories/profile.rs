//! Profile columns of the `users` table

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use super::parse_optional;
use crate::models::{Profile, ProfileChanges};

const PROFILE_COLUMNS: &str = "id, email, name, age, gender, height, weight, activity_level, \
                               fitness_goal, created_at, updated_at";

/// Profile repository
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

fn map_profile(row: &PgRow) -> Result<Profile> {
    Ok(Profile {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        age: row.try_get("age")?,
        gender: parse_optional(row.try_get("gender")?),
        height: row.try_get("height")?,
        weight: row.try_get("weight")?,
        activity_level: parse_optional(row.try_get("activity_level")?),
        fitness_goal: parse_optional(row.try_get("fitness_goal")?),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl ProfileRepository {
    /// Create a new profile repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the profile of a user
    pub async fn find(&self, user_id: Uuid) -> Result<Option<Profile>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE id = $1",
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_profile).transpose()
    }

    /// Apply the present fields of `changes`
    pub async fn update(&self, user_id: Uuid, changes: &ProfileChanges) -> Result<Option<Profile>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                age = COALESCE($3, age),
                gender = COALESCE($4, gender),
                height = COALESCE($5, height),
                weight = COALESCE($6, weight),
                activity_level = COALESCE($7, activity_level),
                fitness_goal = COALESCE($8, fitness_goal),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .bind(changes.name.as_deref())
        .bind(changes.age)
        .bind(changes.gender.map(|g| g.as_str()))
        .bind(changes.height)
        .bind(changes.weight)
        .bind(changes.activity_level.map(|a| a.as_str()))
        .bind(changes.fitness_goal.map(|g| g.as_str()))
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_profile).transpose()
    }
}
