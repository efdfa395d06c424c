use sqlx::PgPool;
use tracing::warn;

use crate::db;
use crate::errors::AppError;
use crate::external::advice_provider::AdviceProvider;
use crate::external::market_provider::MarketProvider;
use crate::models::{ChatMessage, Holding, PortfolioAiAnalysis, User};
use crate::utils::round2;

const SYSTEM_PROMPT: &str = "You are WealthMate, a knowledgeable financial advisor AI assistant. \
    Provide helpful, accurate, and concise financial advice.";

const APOLOGY: &str = "I apologize, but I'm having trouble processing your request at the moment. \
    Please try again later.";

/// Ask the advice provider, substituting a static apology on any failure.
pub async fn financial_advice(
    advice: &dyn AdviceProvider,
    message: &str,
    context: Option<&str>,
) -> String {
    let system_prompt = match context {
        Some(ctx) => format!("{SYSTEM_PROMPT}\n\nAdditional context: {ctx}"),
        None => SYSTEM_PROMPT.to_string(),
    };

    match advice.complete(&system_prompt, message).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Advice provider failed: {}", e);
            APOLOGY.to_string()
        }
    }
}

/// One chat turn: generate advice, persist the exchange to chat history.
pub async fn chat(
    pool: &PgPool,
    advice: &dyn AdviceProvider,
    user: &User,
    message: &str,
    context: Option<&str>,
) -> Result<String, AppError> {
    let response = financial_advice(advice, message, context).await;
    db::chat_queries::insert(pool, &ChatMessage::new(user.id, message, &response)).await?;
    Ok(response)
}

/// Summarize quoted holdings into a prompt and ask the advice provider for
/// a portfolio review. Unquoted holdings are left out of the summary.
pub async fn analyze_portfolio(
    market: &dyn MarketProvider,
    advice: &dyn AdviceProvider,
    holdings: &[Holding],
) -> PortfolioAiAnalysis {
    let mut lines = Vec::new();
    let mut total_value = 0.0;

    for holding in holdings {
        let Ok(quote) = market.get_quote(&holding.symbol).await else {
            warn!("Quote unavailable for {}; omitted from AI summary", holding.symbol);
            continue;
        };
        let current_value = holding.shares * quote.current_price;
        let profit_loss = current_value - holding.shares * holding.purchase_price;
        total_value += current_value;
        lines.push(format!(
            "{}: {} shares at ${:.2} (P/L: ${:.2})",
            holding.symbol, holding.shares, quote.current_price, profit_loss
        ));
    }

    let prompt = format!(
        "Analyze this investment portfolio and provide:\n\
         1. Overall risk assessment\n\
         2. Diversification analysis\n\
         3. Specific recommendations for improvement\n\
         4. Rebalancing suggestions\n\n\
         Portfolio:\n{}\n\
         Total Portfolio Value: ${:.2}\n\n\
         Provide a concise analysis with actionable recommendations.",
        lines.join("\n"),
        total_value
    );

    let analysis = financial_advice(advice, &prompt, None).await;

    PortfolioAiAnalysis {
        total_value: round2(total_value),
        analysis,
        stocks_count: holdings.len(),
    }
}
