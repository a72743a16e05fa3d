//! Nutrition log repository

use anyhow::Result;
use chrono::{DateTime, Utc};
use fitness::{MealType, NutritionLog};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::models::{DateRange, NewNutritionLog, NutritionLogChanges};

const LOG_COLUMNS: &str =
    "id, user_id, date, meal_type, food_name, calories, protein, carbs, fats, created_at, updated_at";

/// Nutrition log repository
#[derive(Clone)]
pub struct NutritionRepository {
    pool: PgPool,
}

fn map_log(row: &PgRow) -> Result<NutritionLog> {
    let meal_type: String = row.try_get("meal_type")?;
    Ok(NutritionLog {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        date: row.try_get("date")?,
        meal_type: meal_type.parse()?,
        food_name: row.try_get("food_name")?,
        calories: row.try_get("calories")?,
        protein: row.try_get("protein")?,
        carbs: row.try_get("carbs")?,
        fats: row.try_get("fats")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl NutritionRepository {
    /// Create a new nutrition repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List logs, newest first, within an optional date range and meal type
    pub async fn list(
        &self,
        user_id: Uuid,
        range: DateRange,
        meal_type: Option<MealType>,
    ) -> Result<Vec<NutritionLog>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM nutrition_logs
            WHERE user_id = $1
              AND ($2::timestamptz IS NULL OR date >= $2)
              AND ($3::timestamptz IS NULL OR date <= $3)
              AND ($4::text IS NULL OR meal_type = $4)
            ORDER BY date DESC
            "#,
            LOG_COLUMNS
        ))
        .bind(user_id)
        .bind(range.start)
        .bind(range.end)
        .bind(meal_type.map(|m| m.as_str()))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_log).collect()
    }

    /// Logs between two inclusive instants
    pub async fn list_between(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<NutritionLog>> {
        self.list(
            user_id,
            DateRange {
                start: Some(start),
                end: Some(end),
            },
            None,
        )
        .await
    }

    /// Insert a log
    pub async fn create(&self, user_id: Uuid, log: &NewNutritionLog) -> Result<NutritionLog> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO nutrition_logs (user_id, date, meal_type, food_name, calories, protein, carbs, fats)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            LOG_COLUMNS
        ))
        .bind(user_id)
        .bind(log.date)
        .bind(log.meal_type.as_str())
        .bind(&log.food_name)
        .bind(log.calories)
        .bind(log.protein)
        .bind(log.carbs)
        .bind(log.fats)
        .fetch_one(&self.pool)
        .await?;

        map_log(&row)
    }

    /// Apply the present fields of `changes`
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: &NutritionLogChanges,
    ) -> Result<Option<NutritionLog>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE nutrition_logs SET
                date = COALESCE($3, date),
                meal_type = COALESCE($4, meal_type),
                food_name = COALESCE($5, food_name),
                calories = COALESCE($6, calories),
                protein = COALESCE($7, protein),
                carbs = COALESCE($8, carbs),
                fats = COALESCE($9, fats),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            LOG_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .bind(changes.date)
        .bind(changes.meal_type.map(|m| m.as_str()))
        .bind(changes.food_name.as_deref())
        .bind(changes.calories)
        .bind(changes.protein)
        .bind(changes.carbs)
        .bind(changes.fats)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_log).transpose()
    }

    /// Delete a log, returning whether it existed
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM nutrition_logs WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
