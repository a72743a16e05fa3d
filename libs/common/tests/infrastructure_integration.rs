//! Integration tests for the infrastructure components
//!
//! These tests verify that the PostgreSQL database is reachable and that the
//! bundled migrations produce the expected schema.

use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use sqlx::Row;

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    assert!(health_check(&pool).await?, "Database health check failed");

    run_migrations(&pool).await?;
    // Applying twice is a no-op
    run_migrations(&pool).await?;

    let rows = sqlx::query(
        "SELECT table_name FROM information_schema.tables \
         WHERE table_schema = 'public' ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await?;

    let tables: Vec<String> = rows.iter().map(|row| row.get("table_name")).collect();
    for expected in [
        "body_measurements",
        "exercises",
        "goals",
        "nutrition_logs",
        "users",
        "workouts",
    ] {
        assert!(
            tables.iter().any(|t| t == expected),
            "missing table {}",
            expected
        );
    }

    Ok(())
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_schema_constraints() -> Result<(), Box<dyn std::error::Error>> {
    let pool = init_pool(&DatabaseConfig::from_env()?).await?;
    run_migrations(&pool).await?;

    let email = format!("constraints-{}@example.com", uuid::Uuid::new_v4());
    let user_id: uuid::Uuid = sqlx::query(
        "INSERT INTO users (email, password_hash, name) VALUES ($1, 'x', 'Ana') RETURNING id",
    )
    .bind(&email)
    .fetch_one(&pool)
    .await?
    .get("id");

    let negative_meal = sqlx::query(
        "INSERT INTO nutrition_logs (user_id, meal_type, food_name, calories, protein, carbs, fats) \
         VALUES ($1, 'Lunch', 'Soup', -10, 1, 1, 1)",
    )
    .bind(user_id)
    .execute(&pool)
    .await;
    assert!(negative_meal.is_err(), "negative calories accepted");

    let body_fat = sqlx::query(
        "INSERT INTO body_measurements (user_id, weight, body_fat) VALUES ($1, 70, 120)",
    )
    .bind(user_id)
    .execute(&pool)
    .await;
    assert!(body_fat.is_err(), "body fat above 100 accepted");

    let insert_goal = "INSERT INTO goals (user_id, type, is_active) VALUES ($1, 'maintenance', TRUE)";
    sqlx::query(insert_goal).bind(user_id).execute(&pool).await?;
    let second_active = sqlx::query(insert_goal).bind(user_id).execute(&pool).await;
    assert!(second_active.is_err(), "second active goal accepted");

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await?;

    Ok(())
}
