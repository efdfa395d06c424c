use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use http::header::AUTHORIZATION;
use http::HeaderMap;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{LoginUser, RegisterUser, User};
use crate::services::password_service;
use crate::services::token_service::{TokenPair, TokenService, TokenType};
use crate::state::AppState;

/// The resolved identity behind a bearer token. Extracting this is the
/// single authorization checkpoint for every protected route.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AppError::Unauthorized)?;
        let user = resolve(&state.pool, &state.tokens, token).await?;
        Ok(AuthUser(user))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolve a raw token to a known user. Refresh tokens do not authorize
/// API calls; only access tokens pass the gate.
pub async fn resolve(pool: &PgPool, tokens: &TokenService, token: &str) -> Result<User, AppError> {
    let claims = tokens.decode(token).ok_or(AppError::Unauthorized)?;
    if claims.token_type != TokenType::Access {
        warn!("Rejected non-access token presented as bearer credential");
        return Err(AppError::Unauthorized);
    }
    db::user_queries::fetch_by_email(pool, &claims.sub)
        .await?
        .ok_or(AppError::Unauthorized)
}

pub async fn register(pool: &PgPool, input: RegisterUser) -> Result<(), AppError> {
    if input.email.trim().is_empty() || !input.email.contains('@') {
        return Err(AppError::Validation("A valid email address is required".into()));
    }
    if input.password.is_empty() {
        return Err(AppError::Validation("Password cannot be empty".into()));
    }
    if db::user_queries::fetch_by_email(pool, &input.email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".into()));
    }
    let user = User::new(input.email, password_service::hash_password(&input.password));
    db::user_queries::insert(pool, &user).await?;
    Ok(())
}

/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn login(
    pool: &PgPool,
    tokens: &TokenService,
    input: LoginUser,
) -> Result<TokenPair, AppError> {
    let user = db::user_queries::fetch_by_email(pool, &input.email)
        .await?
        .ok_or(AppError::Unauthorized)?;
    if !password_service::verify_password(&input.password, &user.hashed_password) {
        return Err(AppError::Unauthorized);
    }
    tokens.issue_pair(&user.email)
}

/// Entity exists but belongs to someone else: `Forbidden`, never `NotFound`.
pub fn ensure_owner(owner_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
    if owner_id == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_owner_distinguishes_forbidden() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        assert!(ensure_owner(owner, owner).is_ok());
        assert!(matches!(ensure_owner(owner, stranger), Err(AppError::Forbidden)));
    }
}
