use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Point-in-time market data for a symbol. Never persisted; fetched fresh
/// for every request that needs it.
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub symbol: String,
    pub current_price: f64,
    pub change_percent: f64,
    pub day_high: f64,
    pub day_low: f64,
    pub volume: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceHistory {
    pub symbol: String,
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
    pub volumes: Vec<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolInfo {
    pub symbol: String,
    pub name: String,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub week_52_high: Option<f64>,
    pub week_52_low: Option<f64>,
}

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,
}

/// Market data source. Callers must treat any error as "unavailable" for
/// that symbol and keep going; a failed lookup never aborts a request.
#[async_trait]
pub trait MarketProvider: Send + Sync {
    async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketError>;

    async fn get_history(&self, symbol: &str, period: &str) -> Result<PriceHistory, MarketError>;

    async fn get_info(&self, symbol: &str) -> Result<SymbolInfo, MarketError>;
}
