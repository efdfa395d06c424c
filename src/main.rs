mod app;
mod db;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod services;
mod state;
mod utils;

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use crate::external::advice_provider::AdviceProvider;
use crate::external::market_provider::MarketProvider;
use crate::external::openai::OpenAiProvider;
use crate::external::yahoo::YahooProvider;
use crate::logging::LoggingConfig;
use crate::services::token_service::TokenService;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    logging::init_logging(LoggingConfig::from_env())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    let database_url = std::env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;
    sqlx::migrate!().run(&pool).await?;

    tracing::info!("📊 Using market data provider: Yahoo Finance");
    let market: Arc<dyn MarketProvider> = Arc::new(YahooProvider::new());
    let advice: Arc<dyn AdviceProvider> = Arc::new(OpenAiProvider::from_env());
    let tokens = TokenService::from_env();

    let state = AppState {
        pool,
        market,
        advice,
        tokens,
    };
    let app = app::create_app(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 WealthMate backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
