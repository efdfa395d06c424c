use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

use crate::db;
use crate::errors::AppError;
use crate::models::{ChatMessage, ChatRequest, ChatResponse};
use crate::services::auth_service::AuthUser;
use crate::services::{advice_service, portfolio_service, risk_service};
use crate::state::AppState;

const CHAT_HISTORY_LIMIT: i64 = 50;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ai/advice", post(ai_advice))
        .route("/chat", post(ai_advice))
        .route("/ai/history", get(chat_history))
        .route("/ai/portfolio-analysis", get(portfolio_analysis))
        .route("/ai/risk-assessment", get(risk_assessment))
}

#[axum::debug_handler]
pub async fn ai_advice(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(data): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    info!("POST /api/chat - {}", user.email);
    let response = advice_service::chat(
        &state.pool,
        state.advice.as_ref(),
        &user,
        &data.message,
        data.context.as_deref(),
    )
    .await?;
    Ok(Json(ChatResponse { response }))
}

pub async fn chat_history(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    info!("GET /api/ai/history - {}", user.email);
    let history = db::chat_queries::fetch_recent(&state.pool, user.id, CHAT_HISTORY_LIMIT).await?;
    Ok(Json(history))
}

pub async fn portfolio_analysis(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Value>, AppError> {
    info!("GET /api/ai/portfolio-analysis - {}", user.email);
    let holdings = portfolio_service::require_portfolio_holdings(&state.pool, user.id).await?;
    if holdings.is_empty() {
        return Ok(Json(json!({"message": "No stocks in portfolio to analyze"})));
    }
    let analysis =
        advice_service::analyze_portfolio(state.market.as_ref(), state.advice.as_ref(), &holdings)
            .await;
    Ok(Json(json!(analysis)))
}

pub async fn risk_assessment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Value>, AppError> {
    info!("GET /api/ai/risk-assessment - {}", user.email);
    let holdings = portfolio_service::require_portfolio_holdings(&state.pool, user.id).await?;
    if holdings.is_empty() {
        return Ok(Json(json!({"message": "No stocks in portfolio to assess"})));
    }
    let report = risk_service::assess_portfolio(state.market.as_ref(), &holdings).await;
    Ok(Json(json!(report)))
}
