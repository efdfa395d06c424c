use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Portfolio;

pub async fn fetch_by_user(pool: &PgPool, user_id: Uuid) -> Result<Option<Portfolio>, sqlx::Error> {
    sqlx::query_as::<_, Portfolio>(
        "SELECT id, user_id, name, created_at
         FROM portfolios
         WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<Portfolio>, sqlx::Error> {
    sqlx::query_as::<_, Portfolio>(
        "SELECT id, user_id, name, created_at
         FROM portfolios
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn insert(pool: &PgPool, portfolio: &Portfolio) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO portfolios (id, user_id, name, created_at)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(portfolio.id)
    .bind(portfolio.user_id)
    .bind(&portfolio.name)
    .bind(portfolio.created_at)
    .execute(pool)
    .await?;
    Ok(())
}
