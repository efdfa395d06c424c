use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use http::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{LoginUser, RegisterUser};
use crate::services::auth_service;
use crate::services::token_service::TokenPair;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(data): Json<RegisterUser>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    info!("POST /api/register - {}", data.email);
    auth_service::register(&state.pool, data).await.map_err(|e| {
        error!("Registration failed: {}", e);
        e
    })?;
    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "User created successfully"})),
    ))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(data): Json<LoginUser>,
) -> Result<Json<TokenPair>, AppError> {
    info!("POST /api/login - {}", data.email);
    let pair = auth_service::login(&state.pool, &state.tokens, data).await?;
    Ok(Json(pair))
}

#[axum::debug_handler]
pub async fn refresh(
    State(state): State<AppState>,
    Json(data): Json<RefreshRequest>,
) -> Result<Json<TokenPair>, AppError> {
    info!("POST /api/refresh");
    let pair = state.tokens.refresh(&data.refresh_token)?;
    Ok(Json(pair))
}
