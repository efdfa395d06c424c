use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::external::market_provider::MarketProvider;
use crate::models::{CreateHolding, Holding, Portfolio, UpdateHolding};
use crate::services::auth_service;

pub async fn get_or_create(pool: &PgPool, user_id: Uuid) -> Result<Portfolio, AppError> {
    if let Some(portfolio) = db::portfolio_queries::fetch_by_user(pool, user_id).await? {
        return Ok(portfolio);
    }
    let portfolio = Portfolio::new(user_id);
    db::portfolio_queries::insert(pool, &portfolio).await?;
    Ok(portfolio)
}

/// Add a holding to the user's portfolio (created lazily on first add).
/// The symbol must resolve to a live quote; otherwise the add is rejected.
pub async fn add_holding(
    pool: &PgPool,
    market: &dyn MarketProvider,
    user_id: Uuid,
    input: CreateHolding,
) -> Result<Holding, AppError> {
    validate_position(input.shares, input.purchase_price)?;

    let symbol = input.symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(AppError::Validation("Symbol cannot be empty".into()));
    }
    market
        .get_quote(&symbol)
        .await
        .map_err(|_| AppError::NotFound("Stock symbol not found".into()))?;

    let portfolio = get_or_create(pool, user_id).await?;
    let holding = Holding::new(portfolio.id, symbol, input.shares, input.purchase_price);
    db::holding_queries::insert(pool, &holding).await?;
    Ok(holding)
}

/// Users without a portfolio simply have no holdings yet.
pub async fn list_holdings(pool: &PgPool, user_id: Uuid) -> Result<Vec<Holding>, AppError> {
    match db::portfolio_queries::fetch_by_user(pool, user_id).await? {
        Some(portfolio) => Ok(db::holding_queries::fetch_by_portfolio(pool, portfolio.id).await?),
        None => Ok(Vec::new()),
    }
}

/// Stricter variant for the analytics endpoints, which 404 when the user
/// has never created a portfolio.
pub async fn require_portfolio_holdings(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Holding>, AppError> {
    let portfolio = db::portfolio_queries::fetch_by_user(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Portfolio not found".to_string()))?;
    Ok(db::holding_queries::fetch_by_portfolio(pool, portfolio.id).await?)
}

/// Fetch a holding with the ownership check applied: absent holding or
/// portfolio is `NotFound`, someone else's holding is `Forbidden`.
pub async fn fetch_owned(
    pool: &PgPool,
    user_id: Uuid,
    holding_id: Uuid,
) -> Result<Holding, AppError> {
    let holding = db::holding_queries::fetch_one(pool, holding_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Stock not found".to_string()))?;
    let portfolio = db::portfolio_queries::fetch_one(pool, holding.portfolio_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Portfolio not found".to_string()))?;
    auth_service::ensure_owner(portfolio.user_id, user_id)?;
    Ok(holding)
}

pub async fn update_holding(
    pool: &PgPool,
    user_id: Uuid,
    holding_id: Uuid,
    input: UpdateHolding,
) -> Result<Holding, AppError> {
    validate_position(input.shares, input.purchase_price)?;
    // Ownership is checked before any write
    fetch_owned(pool, user_id, holding_id).await?;
    db::holding_queries::update(pool, holding_id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound("Stock not found".to_string()))
}

pub async fn delete_holding(pool: &PgPool, user_id: Uuid, holding_id: Uuid) -> Result<(), AppError> {
    fetch_owned(pool, user_id, holding_id).await?;
    match db::holding_queries::delete(pool, holding_id).await? {
        0 => Err(AppError::NotFound("Stock not found".to_string())),
        _ => Ok(()),
    }
}

fn validate_position(shares: f64, purchase_price: f64) -> Result<(), AppError> {
    if shares.is_nan() || shares <= 0.0 {
        return Err(AppError::Validation("Share count must be positive".into()));
    }
    if purchase_price.is_nan() || purchase_price < 0.0 {
        return Err(AppError::Validation("Purchase price cannot be negative".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_position() {
        assert!(validate_position(1.5, 10.0).is_ok());
        assert!(validate_position(1.0, 0.0).is_ok());
        assert!(validate_position(0.0, 10.0).is_err());
        assert!(validate_position(-2.0, 10.0).is_err());
        assert!(validate_position(1.0, -0.01).is_err());
        assert!(validate_position(f64::NAN, 10.0).is_err());
        assert!(validate_position(1.0, f64::NAN).is_err());
    }
}
