use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use http::StatusCode;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    BudgetEntry, CreateBudgetEntry, CreateGoal, FinanceSummary, FinancialGoal, UpdateGoalProgress,
};
use crate::services::auth_service::AuthUser;
use crate::services::budget_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/budget/add", post(add_entry))
        .route("/budget", get(list_entries))
        .route("/goals/create", post(create_goal))
        .route("/goals", get(list_goals))
        .route("/goals/:id/progress", put(update_goal_progress))
        .route("/analytics/summary", get(summary))
}

#[axum::debug_handler]
pub async fn add_entry(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(data): Json<CreateBudgetEntry>,
) -> Result<(StatusCode, Json<BudgetEntry>), AppError> {
    info!("POST /api/budget/add - {}", user.email);
    let entry = budget_service::add_entry(&state.pool, user.id, data)
        .await
        .map_err(|e| {
            error!("Failed to add budget entry: {}", e);
            e
        })?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_entries(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<BudgetEntry>>, AppError> {
    info!("GET /api/budget - {}", user.email);
    let entries = budget_service::list_entries(&state.pool, user.id).await?;
    Ok(Json(entries))
}

#[axum::debug_handler]
pub async fn create_goal(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(data): Json<CreateGoal>,
) -> Result<(StatusCode, Json<FinancialGoal>), AppError> {
    info!("POST /api/goals/create - {}", user.email);
    let goal = budget_service::create_goal(&state.pool, user.id, data)
        .await
        .map_err(|e| {
            error!("Failed to create goal: {}", e);
            e
        })?;
    Ok((StatusCode::CREATED, Json(goal)))
}

pub async fn list_goals(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<FinancialGoal>>, AppError> {
    info!("GET /api/goals - {}", user.email);
    let goals = budget_service::list_goals(&state.pool, user.id).await?;
    Ok(Json(goals))
}

pub async fn update_goal_progress(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateGoalProgress>,
) -> Result<Json<FinancialGoal>, AppError> {
    info!("PUT /api/goals/{}/progress - {}", id, user.email);
    let goal = budget_service::update_goal_progress(&state.pool, user.id, id, data)
        .await
        .map_err(|e| {
            error!("Failed to update goal {}: {}", id, e);
            e
        })?;
    Ok(Json(goal))
}

pub async fn summary(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<FinanceSummary>, AppError> {
    info!("GET /api/analytics/summary - {}", user.email);
    let summary = budget_service::summary(&state.pool, state.market.as_ref(), user.id).await?;
    Ok(Json(summary))
}
