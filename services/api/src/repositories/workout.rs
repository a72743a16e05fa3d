//! Workout repository; exercises are stored in their own table

use anyhow::Result;
use sqlx::{PgConnection, PgPool, Row, postgres::PgRow};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{DateRange, Exercise, ExerciseInput, NewWorkout, Workout, WorkoutChanges};

const WORKOUT_COLUMNS: &str =
    "id, user_id, name, description, date, duration, created_at, updated_at";

/// Workout repository
#[derive(Clone)]
pub struct WorkoutRepository {
    pool: PgPool,
}

fn map_workout(row: &PgRow, exercises: Vec<Exercise>) -> Result<Workout> {
    Ok(Workout {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        date: row.try_get("date")?,
        duration: row.try_get("duration")?,
        exercises,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn map_exercise(row: &PgRow) -> Result<Exercise> {
    Ok(Exercise {
        id: row.try_get("id")?,
        workout_id: row.try_get("workout_id")?,
        name: row.try_get("name")?,
        sets: row.try_get("sets")?,
        reps: row.try_get("reps")?,
        weight: row.try_get("weight")?,
        notes: row.try_get("notes")?,
    })
}

async fn insert_exercises(
    conn: &mut PgConnection,
    workout_id: Uuid,
    exercises: &[ExerciseInput],
) -> Result<Vec<Exercise>> {
    let mut inserted = Vec::with_capacity(exercises.len());
    for (position, exercise) in exercises.iter().enumerate() {
        let row = sqlx::query(
            r#"
            INSERT INTO exercises (workout_id, name, sets, reps, weight, notes, position)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, workout_id, name, sets, reps, weight, notes
            "#,
        )
        .bind(workout_id)
        .bind(&exercise.name)
        .bind(exercise.sets)
        .bind(exercise.reps)
        .bind(exercise.weight)
        .bind(exercise.notes.as_deref())
        .bind(i32::try_from(position)?)
        .fetch_one(&mut *conn)
        .await?;
        inserted.push(map_exercise(&row)?);
    }
    Ok(inserted)
}

impl WorkoutRepository {
    /// Create a new workout repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exercises_for(&self, workout_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Exercise>>> {
        let rows = sqlx::query(
            r#"
            SELECT id, workout_id, name, sets, reps, weight, notes
            FROM exercises
            WHERE workout_id = ANY($1)
            ORDER BY workout_id, position
            "#,
        )
        .bind(workout_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<Exercise>> = HashMap::new();
        for row in &rows {
            let exercise = map_exercise(row)?;
            grouped.entry(exercise.workout_id).or_default().push(exercise);
        }
        Ok(grouped)
    }

    /// List workouts with their exercises, newest first
    pub async fn list(&self, user_id: Uuid, range: DateRange) -> Result<Vec<Workout>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM workouts
            WHERE user_id = $1
              AND ($2::timestamptz IS NULL OR date >= $2)
              AND ($3::timestamptz IS NULL OR date <= $3)
            ORDER BY date DESC
            "#,
            WORKOUT_COLUMNS
        ))
        .bind(user_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        let ids = rows
            .iter()
            .map(|row| row.try_get("id"))
            .collect::<Result<Vec<Uuid>, _>>()?;
        let mut exercises = self.exercises_for(&ids).await?;

        rows.iter()
            .zip(ids)
            .map(|(row, id)| map_workout(row, exercises.remove(&id).unwrap_or_default()))
            .collect()
    }

    /// Get one workout with its exercises
    pub async fn find(&self, user_id: Uuid, id: Uuid) -> Result<Option<Workout>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM workouts WHERE id = $1 AND user_id = $2",
            WORKOUT_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let mut exercises = self.exercises_for(&[id]).await?;
                map_workout(&row, exercises.remove(&id).unwrap_or_default()).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Insert a workout and its exercises in one transaction
    pub async fn create(&self, user_id: Uuid, workout: &NewWorkout) -> Result<Workout> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO workouts (user_id, name, description, date, duration)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            WORKOUT_COLUMNS
        ))
        .bind(user_id)
        .bind(&workout.name)
        .bind(workout.description.as_deref())
        .bind(workout.date)
        .bind(workout.duration)
        .fetch_one(&mut *tx)
        .await?;

        let workout_id: Uuid = row.try_get("id")?;
        let exercises = insert_exercises(&mut *tx, workout_id, &workout.exercises).await?;

        tx.commit().await?;
        map_workout(&row, exercises)
    }

    /// Apply the present fields of `changes`, replacing the exercises when
    /// a new list is supplied
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        changes: &WorkoutChanges,
    ) -> Result<Option<Workout>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            r#"
            UPDATE workouts SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                date = COALESCE($5, date),
                duration = COALESCE($6, duration),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            WORKOUT_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .bind(changes.name.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.date)
        .bind(changes.duration)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let exercises = match &changes.exercises {
            Some(replacement) => {
                sqlx::query("DELETE FROM exercises WHERE workout_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                Some(insert_exercises(&mut *tx, id, replacement).await?)
            }
            None => None,
        };

        tx.commit().await?;

        let exercises = match exercises {
            Some(exercises) => exercises,
            None => self
                .exercises_for(&[id])
                .await?
                .remove(&id)
                .unwrap_or_default(),
        };
        map_workout(&row, exercises).map(Some)
    }

    /// Delete a workout and, through the cascade, its exercises
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
