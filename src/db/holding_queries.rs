use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Holding, UpdateHolding};

pub async fn insert(pool: &PgPool, holding: &Holding) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO holdings (id, portfolio_id, symbol, shares, purchase_price, purchase_date)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(holding.id)
    .bind(holding.portfolio_id)
    .bind(&holding.symbol)
    .bind(holding.shares)
    .bind(holding.purchase_price)
    .bind(holding.purchase_date)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn fetch_by_portfolio(pool: &PgPool, portfolio_id: Uuid) -> Result<Vec<Holding>, sqlx::Error> {
    sqlx::query_as::<_, Holding>(
        "SELECT id, portfolio_id, symbol, shares, purchase_price, purchase_date
         FROM holdings
         WHERE portfolio_id = $1
         ORDER BY purchase_date ASC",
    )
    .bind(portfolio_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<Holding>, sqlx::Error> {
    sqlx::query_as::<_, Holding>(
        "SELECT id, portfolio_id, symbol, shares, purchase_price, purchase_date
         FROM holdings
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: &UpdateHolding,
) -> Result<Option<Holding>, sqlx::Error> {
    sqlx::query_as::<_, Holding>(
        "UPDATE holdings
         SET shares = $1, purchase_price = $2
         WHERE id = $3
         RETURNING id, portfolio_id, symbol, shares, purchase_price, purchase_date",
    )
    .bind(input.shares)
    .bind(input.purchase_price)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM holdings WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
