use sqlx::PgPool;
use uuid::Uuid;

use crate::models::BudgetEntry;

pub async fn insert(pool: &PgPool, entry: &BudgetEntry) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO budgets (id, user_id, category, amount, entry_type, entry_date)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(entry.id)
    .bind(entry.user_id)
    .bind(&entry.category)
    .bind(entry.amount)
    .bind(&entry.entry_type)
    .bind(entry.entry_date)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn fetch_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<BudgetEntry>, sqlx::Error> {
    sqlx::query_as::<_, BudgetEntry>(
        "SELECT id, user_id, category, amount, entry_type, entry_date
         FROM budgets
         WHERE user_id = $1
         ORDER BY entry_date DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
