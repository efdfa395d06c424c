use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::external::market_provider::{PriceHistory, Quote, SymbolInfo};
use crate::models::{CreateHolding, Holding, HoldingValuation, PortfolioAnalysis, UpdateHolding};
use crate::services::auth_service::AuthUser;
use crate::services::{portfolio_service, valuation_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_holding))
        .route("/stocks", get(list_holdings))
        .route("/analytics", get(portfolio_analytics))
        .route("/stock/:symbol/price", get(stock_price))
        .route("/stock/:symbol/history", get(stock_history))
        .route("/stock/:symbol/info", get(stock_info))
        .route("/holding/:id/profit-loss", get(holding_profit_loss))
        .route("/holding/:id", put(update_holding))
        .route("/holding/:id", delete(delete_holding))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub period: Option<String>,
}

#[axum::debug_handler]
pub async fn add_holding(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(data): Json<CreateHolding>,
) -> Result<Json<Value>, AppError> {
    info!("POST /api/portfolio/add - {} buys {}", user.email, data.symbol);
    portfolio_service::add_holding(&state.pool, state.market.as_ref(), user.id, data)
        .await
        .map_err(|e| {
            error!("Failed to add holding: {}", e);
            e
        })?;
    Ok(Json(json!({"message": "Investment added successfully"})))
}

pub async fn list_holdings(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Holding>>, AppError> {
    info!("GET /api/portfolio/stocks - {}", user.email);
    let holdings = portfolio_service::list_holdings(&state.pool, user.id).await?;
    Ok(Json(holdings))
}

// Quote endpoints are public: they expose market data, not user data.
pub async fn stock_price(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<Quote>, AppError> {
    info!("GET /api/portfolio/stock/{}/price", symbol);
    let quote = state
        .market
        .get_quote(&symbol)
        .await
        .map_err(|_| AppError::NotFound("Stock symbol not found".to_string()))?;
    Ok(Json(quote))
}

pub async fn stock_history(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<PriceHistory>, AppError> {
    let period = params.period.unwrap_or_else(|| "1mo".to_string());
    info!("GET /api/portfolio/stock/{}/history - period {}", symbol, period);
    let history = state
        .market
        .get_history(&symbol, &period)
        .await
        .map_err(|_| AppError::NotFound("Unable to fetch historical data".to_string()))?;
    Ok(Json(history))
}

pub async fn stock_info(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<SymbolInfo>, AppError> {
    info!("GET /api/portfolio/stock/{}/info", symbol);
    let info = state
        .market
        .get_info(&symbol)
        .await
        .map_err(|_| AppError::NotFound("Unable to fetch stock information".to_string()))?;
    Ok(Json(info))
}

pub async fn portfolio_analytics(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<PortfolioAnalysis>, AppError> {
    info!("GET /api/portfolio/analytics - {}", user.email);
    let holdings = portfolio_service::require_portfolio_holdings(&state.pool, user.id).await?;
    let analysis = valuation_service::analyze(state.market.as_ref(), &holdings).await;
    Ok(Json(analysis))
}

pub async fn holding_profit_loss(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<HoldingValuation>, AppError> {
    info!("GET /api/portfolio/holding/{}/profit-loss - {}", id, user.email);
    let holding = portfolio_service::fetch_owned(&state.pool, user.id, id).await?;
    let valuation = valuation_service::holding_profit_loss(state.market.as_ref(), &holding).await?;
    Ok(Json(valuation))
}

pub async fn update_holding(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateHolding>,
) -> Result<Json<Value>, AppError> {
    info!("PUT /api/portfolio/holding/{} - {}", id, user.email);
    portfolio_service::update_holding(&state.pool, user.id, id, data)
        .await
        .map_err(|e| {
            error!("Failed to update holding {}: {}", id, e);
            e
        })?;
    Ok(Json(json!({"message": "Stock updated"})))
}

pub async fn delete_holding(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    info!("DELETE /api/portfolio/holding/{} - {}", id, user.email);
    portfolio_service::delete_holding(&state.pool, user.id, id)
        .await
        .map_err(|e| {
            error!("Failed to delete holding {}: {}", id, e);
            e
        })?;
    Ok(Json(json!({"message": "Stock deleted"})))
}
