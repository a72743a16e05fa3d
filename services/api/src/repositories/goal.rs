//! Goal repository

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::models::{Goal, GoalChanges, NewGoal};

const GOAL_COLUMNS: &str = "id, user_id, type, target_weight, target_date, daily_calories, \
                            daily_protein, daily_carbs, daily_fats, weekly_workouts, is_active, \
                            created_at, updated_at";

/// Goal repository
#[derive(Clone)]
pub struct GoalRepository {
    pool: PgPool,
}

fn map_goal(row: &PgRow) -> Result<Goal> {
    let goal_type: String = row.try_get("type")?;
    Ok(Goal {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        goal_type: goal_type.parse()?,
        target_weight: row.try_get("target_weight")?,
        target_date: row.try_get("target_date")?,
        daily_calories: row.try_get("daily_calories")?,
        daily_protein: row.try_get("daily_protein")?,
        daily_carbs: row.try_get("daily_carbs")?,
        daily_fats: row.try_get("daily_fats")?,
        weekly_workouts: row.try_get("weekly_workouts")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl GoalRepository {
    /// Create a new goal repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List goals, newest first, optionally filtered on the active flag
    pub async fn list(&self, user_id: Uuid, active: Option<bool>) -> Result<Vec<Goal>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM goals
            WHERE user_id = $1 AND ($2::boolean IS NULL OR is_active = $2)
            ORDER BY created_at DESC
            "#,
            GOAL_COLUMNS
        ))
        .bind(user_id)
        .bind(active)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_goal).collect()
    }

    /// Get the current active goal
    pub async fn find_active(&self, user_id: Uuid) -> Result<Option<Goal>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM goals
            WHERE user_id = $1 AND is_active
            ORDER BY created_at DESC
            LIMIT 1
            "#,
            GOAL_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_goal).transpose()
    }

    /// Insert a goal as the only active one
    ///
    /// Deactivating the previous goals and inserting run in one transaction.
    pub async fn create(&self, user_id: Uuid, goal: &NewGoal) -> Result<Goal> {
        let mut tx = self.pool.begin().await?;

        let deactivated = sqlx::query(
            "UPDATE goals SET is_active = FALSE, updated_at = NOW() \
             WHERE user_id = $1 AND is_active",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO goals (user_id, type, target_weight, target_date, daily_calories,
                               daily_protein, daily_carbs, daily_fats, weekly_workouts, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, TRUE)
            RETURNING {}
            "#,
            GOAL_COLUMNS
        ))
        .bind(user_id)
        .bind(goal.goal_type.as_str())
        .bind(goal.target_weight)
        .bind(goal.target_date)
        .bind(goal.daily_calories)
        .bind(goal.daily_protein)
        .bind(goal.daily_carbs)
        .bind(goal.daily_fats)
        .bind(goal.weekly_workouts)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            "Created {} goal for user {} ({} previous goal(s) deactivated)",
            goal.goal_type, user_id, deactivated
        );
        map_goal(&row)
    }

    /// Apply the present fields of `changes`
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: &GoalChanges,
    ) -> Result<Option<Goal>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE goals SET
                type = COALESCE($3, type),
                target_weight = COALESCE($4, target_weight),
                target_date = COALESCE($5, target_date),
                daily_calories = COALESCE($6, daily_calories),
                daily_protein = COALESCE($7, daily_protein),
                daily_carbs = COALESCE($8, daily_carbs),
                daily_fats = COALESCE($9, daily_fats),
                weekly_workouts = COALESCE($10, weekly_workouts),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            GOAL_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .bind(changes.goal_type.map(|g| g.as_str()))
        .bind(changes.target_weight)
        .bind(changes.target_date)
        .bind(changes.daily_calories)
        .bind(changes.daily_protein)
        .bind(changes.daily_carbs)
        .bind(changes.daily_fats)
        .bind(changes.weekly_workouts)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_goal).transpose()
    }

    /// Delete a goal, returning whether it existed
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM goals WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
