use std::sync::Arc;

use sqlx::PgPool;

use crate::external::advice_provider::AdviceProvider;
use crate::external::market_provider::MarketProvider;
use crate::services::token_service::TokenService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub market: Arc<dyn MarketProvider>,
    pub advice: Arc<dyn AdviceProvider>,
    pub tokens: TokenService,
}
