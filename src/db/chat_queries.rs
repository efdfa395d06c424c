use sqlx::PgPool;
use uuid::Uuid;

use crate::models::ChatMessage;

pub async fn insert(pool: &PgPool, entry: &ChatMessage) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO chat_history (id, user_id, message, response, created_at)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(entry.id)
    .bind(entry.user_id)
    .bind(&entry.message)
    .bind(&entry.response)
    .bind(entry.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn fetch_recent(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<ChatMessage>, sqlx::Error> {
    sqlx::query_as::<_, ChatMessage>(
        "SELECT id, user_id, message, response, created_at
         FROM chat_history
         WHERE user_id = $1
         ORDER BY created_at DESC
         LIMIT $2",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}
