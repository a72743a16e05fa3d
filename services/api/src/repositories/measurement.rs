//! Body measurement repository

use anyhow::Result;
use chrono::{DateTime, Utc};
use fitness::BodyMeasurement;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::models::{DateRange, MeasurementChanges, NewMeasurement};

const MEASUREMENT_COLUMNS: &str = "id, user_id, date, weight, body_fat, chest, waist, hips, arms, \
                                   thighs, notes, created_at, updated_at";

/// Body measurement repository
#[derive(Clone)]
pub struct MeasurementRepository {
    pool: PgPool,
}

fn map_measurement(row: &PgRow) -> Result<BodyMeasurement> {
    Ok(BodyMeasurement {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        date: row.try_get("date")?,
        weight: row.try_get("weight")?,
        body_fat: row.try_get("body_fat")?,
        chest: row.try_get("chest")?,
        waist: row.try_get("waist")?,
        hips: row.try_get("hips")?,
        arms: row.try_get("arms")?,
        thighs: row.try_get("thighs")?,
        notes: row.try_get("notes")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

impl MeasurementRepository {
    /// Create a new measurement repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List measurements, newest first
    pub async fn list(
        &self,
        user_id: Uuid,
        range: DateRange,
        limit: Option<i64>,
    ) -> Result<Vec<BodyMeasurement>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM body_measurements
            WHERE user_id = $1
              AND ($2::timestamptz IS NULL OR date >= $2)
              AND ($3::timestamptz IS NULL OR date <= $3)
            ORDER BY date DESC
            LIMIT $4
            "#,
            MEASUREMENT_COLUMNS
        ))
        .bind(user_id)
        .bind(range.start)
        .bind(range.end)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_measurement).collect()
    }

    /// Most recent measurement by date
    pub async fn latest(&self, user_id: Uuid) -> Result<Option<BodyMeasurement>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM body_measurements
            WHERE user_id = $1
            ORDER BY date DESC
            LIMIT 1
            "#,
            MEASUREMENT_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_measurement).transpose()
    }

    /// Measurements taken at or after `cutoff`
    pub async fn since(
        &self,
        user_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<BodyMeasurement>> {
        self.list(
            user_id,
            DateRange {
                start: Some(cutoff),
                end: None,
            },
            None,
        )
        .await
    }

    /// Insert a measurement
    pub async fn create(&self, user_id: Uuid, m: &NewMeasurement) -> Result<BodyMeasurement> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO body_measurements
                (user_id, date, weight, body_fat, chest, waist, hips, arms, thighs, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            MEASUREMENT_COLUMNS
        ))
        .bind(user_id)
        .bind(m.date)
        .bind(m.weight)
        .bind(m.body_fat)
        .bind(m.circumferences.chest)
        .bind(m.circumferences.waist)
        .bind(m.circumferences.hips)
        .bind(m.circumferences.arms)
        .bind(m.circumferences.thighs)
        .bind(m.notes.as_deref())
        .fetch_one(&self.pool)
        .await?;

        map_measurement(&row)
    }

    /// Apply the present fields of `changes`
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: &MeasurementChanges,
    ) -> Result<Option<BodyMeasurement>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE body_measurements SET
                date = COALESCE($3, date),
                weight = COALESCE($4, weight),
                body_fat = COALESCE($5, body_fat),
                chest = COALESCE($6, chest),
                waist = COALESCE($7, waist),
                hips = COALESCE($8, hips),
                arms = COALESCE($9, arms),
                thighs = COALESCE($10, thighs),
                notes = COALESCE($11, notes),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            MEASUREMENT_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .bind(changes.date)
        .bind(changes.weight)
        .bind(changes.body_fat)
        .bind(changes.circumferences.chest)
        .bind(changes.circumferences.waist)
        .bind(changes.circumferences.hips)
        .bind(changes.circumferences.arms)
        .bind(changes.circumferences.thighs)
        .bind(changes.notes.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_measurement).transpose()
    }

    /// Delete a measurement, returning whether it existed
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM body_measurements WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
