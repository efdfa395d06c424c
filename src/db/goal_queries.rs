use sqlx::PgPool;
use uuid::Uuid;

use crate::models::FinancialGoal;

pub async fn insert(pool: &PgPool, goal: &FinancialGoal) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO financial_goals (id, user_id, name, target_amount, current_amount, deadline, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(goal.id)
    .bind(goal.user_id)
    .bind(&goal.name)
    .bind(goal.target_amount)
    .bind(goal.current_amount)
    .bind(goal.deadline)
    .bind(goal.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn fetch_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<FinancialGoal>, sqlx::Error> {
    sqlx::query_as::<_, FinancialGoal>(
        "SELECT id, user_id, name, target_amount, current_amount, deadline, created_at
         FROM financial_goals
         WHERE user_id = $1
         ORDER BY created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<FinancialGoal>, sqlx::Error> {
    sqlx::query_as::<_, FinancialGoal>(
        "SELECT id, user_id, name, target_amount, current_amount, deadline, created_at
         FROM financial_goals
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update_progress(
    pool: &PgPool,
    id: Uuid,
    current_amount: f64,
) -> Result<Option<FinancialGoal>, sqlx::Error> {
    sqlx::query_as::<_, FinancialGoal>(
        "UPDATE financial_goals
         SET current_amount = $1
         WHERE id = $2
         RETURNING id, user_id, name, target_amount, current_amount, deadline, created_at",
    )
    .bind(current_amount)
    .bind(id)
    .fetch_optional(pool)
    .await
}
