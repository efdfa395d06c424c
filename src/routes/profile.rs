use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::db;
use crate::errors::AppError;
use crate::models::{UpdateProfile, User};
use crate::services::auth_service::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile))
        .route("/update", post(update_profile))
}

pub async fn get_profile(AuthUser(user): AuthUser) -> Json<User> {
    info!("GET /api/profile - {}", user.email);
    Json(user)
}

pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(data): Json<UpdateProfile>,
) -> Result<Json<Value>, AppError> {
    info!("POST /api/profile/update - {}", user.email);
    db::user_queries::update_profile(&state.pool, user.id, &data)
        .await
        .map_err(|e| {
            error!("Failed to update profile for {}: {}", user.email, e);
            AppError::Db(e)
        })?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(json!({"message": "Profile updated successfully"})))
}
