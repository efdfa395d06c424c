use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{UpdateProfile, User};

pub async fn insert(pool: &PgPool, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (id, email, hashed_password, created_at)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.hashed_password)
    .bind(user.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn fetch_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, email, hashed_password, full_name, phone, location, created_at
         FROM users
         WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    input: &UpdateProfile,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users
         SET full_name = COALESCE($1, full_name),
             phone = COALESCE($2, phone),
             location = COALESCE($3, location)
         WHERE id = $4
         RETURNING id, email, hashed_password, full_name, phone, location, created_at",
    )
    .bind(&input.full_name)
    .bind(&input.phone)
    .bind(&input.location)
    .bind(id)
    .fetch_optional(pool)
    .await
}
