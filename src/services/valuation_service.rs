use tracing::warn;

use crate::errors::AppError;
use crate::external::market_provider::{MarketProvider, Quote};
use crate::models::{Holding, HoldingValuation, PortfolioAnalysis};
use crate::utils::round2;

/// Value one holding against its live quote. `profit_loss_percentage` is
/// defined as 0 when the cost basis is zero; the division never produces
/// inf or NaN here.
pub fn value_holding(holding: &Holding, quote: &Quote) -> HoldingValuation {
    let current_value = holding.shares * quote.current_price;
    let cost_basis = holding.shares * holding.purchase_price;
    let profit_loss = current_value - cost_basis;
    let profit_loss_pct = if cost_basis > 0.0 {
        profit_loss / cost_basis * 100.0
    } else {
        0.0
    };

    HoldingValuation {
        symbol: holding.symbol.clone(),
        shares: holding.shares,
        purchase_price: holding.purchase_price,
        current_price: quote.current_price,
        cost_basis: round2(cost_basis),
        current_value: round2(current_value),
        profit_loss: round2(profit_loss),
        profit_loss_percentage: round2(profit_loss_pct),
    }
}

/// Aggregate portfolio performance as a fold over per-holding quotes.
/// `quotes[i]` is the quote for `holdings[i]`, or `None` when the lookup
/// failed; failed holdings are skipped from the totals without aborting
/// the computation. When holdings exist but no quote resolved at all, the
/// result is a zeroed analysis flagged "Unable to assess".
pub fn value_portfolio(holdings: &[Holding], quotes: &[Option<Quote>]) -> PortfolioAnalysis {
    let mut total_value = 0.0;
    let mut total_cost = 0.0;
    let mut quoted = 0usize;
    let mut recommendations = Vec::new();

    for (holding, quote) in holdings.iter().zip(quotes) {
        let Some(quote) = quote else { continue };
        quoted += 1;

        let current_value = holding.shares * quote.current_price;
        let cost_basis = holding.shares * holding.purchase_price;
        total_value += current_value;
        total_cost += cost_basis;

        let pct = if cost_basis > 0.0 {
            (current_value - cost_basis) / cost_basis * 100.0
        } else {
            0.0
        };
        if pct < -10.0 {
            recommendations.push(format!(
                "Consider reviewing {} - down {:.1}%",
                holding.symbol,
                pct.abs()
            ));
        } else if pct > 20.0 {
            recommendations.push(format!(
                "Consider taking profits on {} - up {:.1}%",
                holding.symbol, pct
            ));
        }
    }

    if !holdings.is_empty() && quoted == 0 {
        return PortfolioAnalysis {
            total_value: 0.0,
            total_cost: 0.0,
            total_profit_loss: 0.0,
            profit_loss_percentage: 0.0,
            diversification_score: 0.0,
            risk_assessment: "Unable to assess".to_string(),
            recommendations: vec!["Error calculating portfolio performance".to_string()],
        };
    }

    let total_profit_loss = total_value - total_cost;
    let profit_loss_percentage = if total_cost > 0.0 {
        total_profit_loss / total_cost * 100.0
    } else {
        0.0
    };

    let count = holdings.len();
    if count < 3 {
        recommendations.push("Consider adding more stocks to diversify your portfolio".to_string());
    }
    if recommendations.is_empty() {
        recommendations
            .push("Your portfolio is performing well. Continue monitoring regularly.".to_string());
    }

    PortfolioAnalysis {
        total_value: round2(total_value),
        total_cost: round2(total_cost),
        total_profit_loss: round2(total_profit_loss),
        profit_loss_percentage: round2(profit_loss_percentage),
        diversification_score: diversification_score(count),
        risk_assessment: risk_bucket(count).to_string(),
        recommendations,
    }
}

// Position-count proxy: 5 distinct positions max out the score.
fn diversification_score(holding_count: usize) -> f64 {
    (holding_count * 20).min(100) as f64
}

fn risk_bucket(holding_count: usize) -> &'static str {
    if holding_count < 3 {
        "High Risk - Low Diversification"
    } else if holding_count < 7 {
        "Medium Risk - Moderate Diversification"
    } else {
        "Lower Risk - Well Diversified"
    }
}

/// Fetch one quote per holding and fold. Lookups are sequential and
/// uncached; a failure only drops that holding from the totals.
pub async fn analyze(market: &dyn MarketProvider, holdings: &[Holding]) -> PortfolioAnalysis {
    let mut quotes = Vec::with_capacity(holdings.len());
    for holding in holdings {
        match market.get_quote(&holding.symbol).await {
            Ok(quote) => quotes.push(Some(quote)),
            Err(e) => {
                warn!("Quote unavailable for {}: {}", holding.symbol, e);
                quotes.push(None);
            }
        }
    }
    value_portfolio(holdings, &quotes)
}

pub async fn holding_profit_loss(
    market: &dyn MarketProvider,
    holding: &Holding,
) -> Result<HoldingValuation, AppError> {
    match market.get_quote(&holding.symbol).await {
        Ok(quote) => Ok(value_holding(holding, &quote)),
        Err(e) => {
            warn!("Quote unavailable for {}: {}", holding.symbol, e);
            Err(AppError::External(format!(
                "Unable to fetch current price for {}",
                holding.symbol
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn holding(symbol: &str, shares: f64, purchase_price: f64) -> Holding {
        Holding {
            id: Uuid::new_v4(),
            portfolio_id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            shares,
            purchase_price,
            purchase_date: Utc::now(),
        }
    }

    fn quote(symbol: &str, price: f64) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            current_price: price,
            change_percent: 0.0,
            day_high: price,
            day_low: price,
            volume: 0,
        }
    }

    #[test]
    fn test_value_holding_zero_cost_basis() {
        let valuation = value_holding(&holding("FREE", 10.0, 0.0), &quote("FREE", 5.0));
        assert_eq!(valuation.cost_basis, 0.0);
        assert_eq!(valuation.current_value, 50.0);
        assert_eq!(valuation.profit_loss, 50.0);
        // Guarded: zero cost basis yields 0, not inf
        assert_eq!(valuation.profit_loss_percentage, 0.0);
    }

    #[test]
    fn test_value_holding_gain() {
        let valuation = value_holding(&holding("AAPL", 10.0, 100.0), &quote("AAPL", 150.0));
        assert_eq!(valuation.cost_basis, 1000.0);
        assert_eq!(valuation.current_value, 1500.0);
        assert_eq!(valuation.profit_loss, 500.0);
        assert_eq!(valuation.profit_loss_percentage, 50.0);
    }

    #[test]
    fn test_value_portfolio_aggregates() {
        let holdings = vec![holding("AAPL", 10.0, 100.0), holding("TSLA", 5.0, 200.0)];
        let quotes = vec![Some(quote("AAPL", 150.0)), Some(quote("TSLA", 180.0))];

        let analysis = value_portfolio(&holdings, &quotes);
        assert_eq!(analysis.total_value, 2400.0);
        assert_eq!(analysis.total_cost, 2000.0);
        assert_eq!(analysis.total_profit_loss, 400.0);
        assert_eq!(analysis.profit_loss_percentage, 20.0);
        assert_eq!(analysis.diversification_score, 40.0);
        assert_eq!(analysis.risk_assessment, "High Risk - Low Diversification");
    }

    #[test]
    fn test_value_portfolio_skips_unquoted_holdings() {
        let holdings = vec![holding("AAPL", 10.0, 100.0), holding("GONE", 5.0, 200.0)];
        let quotes = vec![Some(quote("AAPL", 150.0)), None];

        let analysis = value_portfolio(&holdings, &quotes);
        // GONE is excluded from totals but still counts toward diversification
        assert_eq!(analysis.total_value, 1500.0);
        assert_eq!(analysis.total_cost, 1000.0);
        assert_eq!(analysis.diversification_score, 40.0);
    }

    #[test]
    fn test_value_portfolio_all_quotes_failed() {
        let holdings = vec![holding("AAPL", 10.0, 100.0)];
        let analysis = value_portfolio(&holdings, &[None]);
        assert_eq!(analysis.total_value, 0.0);
        assert_eq!(analysis.risk_assessment, "Unable to assess");
        assert_eq!(
            analysis.recommendations,
            vec!["Error calculating portfolio performance".to_string()]
        );
    }

    #[test]
    fn test_value_portfolio_empty_holdings() {
        let analysis = value_portfolio(&[], &[]);
        assert_eq!(analysis.total_value, 0.0);
        assert_eq!(analysis.diversification_score, 0.0);
        assert_eq!(analysis.risk_assessment, "High Risk - Low Diversification");
    }

    #[test]
    fn test_recommendation_rules() {
        // Down more than 10% -> review note; up more than 20% -> profit note
        let holdings = vec![
            holding("LOSS", 10.0, 100.0),
            holding("GAIN", 10.0, 100.0),
            holding("FLAT", 10.0, 100.0),
        ];
        let quotes = vec![
            Some(quote("LOSS", 80.0)),
            Some(quote("GAIN", 130.0)),
            Some(quote("FLAT", 100.0)),
        ];

        let analysis = value_portfolio(&holdings, &quotes);
        assert_eq!(analysis.recommendations.len(), 2);
        assert_eq!(analysis.recommendations[0], "Consider reviewing LOSS - down 20.0%");
        assert_eq!(
            analysis.recommendations[1],
            "Consider taking profits on GAIN - up 30.0%"
        );
    }

    #[test]
    fn test_generic_recommendation_when_nothing_notable() {
        let holdings = vec![
            holding("A", 1.0, 100.0),
            holding("B", 1.0, 100.0),
            holding("C", 1.0, 100.0),
        ];
        let quotes = vec![
            Some(quote("A", 105.0)),
            Some(quote("B", 95.0)),
            Some(quote("C", 100.0)),
        ];

        let analysis = value_portfolio(&holdings, &quotes);
        assert_eq!(
            analysis.recommendations,
            vec!["Your portfolio is performing well. Continue monitoring regularly.".to_string()]
        );
        assert_eq!(analysis.risk_assessment, "Medium Risk - Moderate Diversification");
    }

    #[test]
    fn test_diversification_score_caps_at_100() {
        assert_eq!(diversification_score(0), 0.0);
        assert_eq!(diversification_score(2), 40.0);
        assert_eq!(diversification_score(5), 100.0);
        assert_eq!(diversification_score(12), 100.0);
    }

    #[test]
    fn test_risk_bucket_boundaries() {
        assert_eq!(risk_bucket(2), "High Risk - Low Diversification");
        assert_eq!(risk_bucket(3), "Medium Risk - Moderate Diversification");
        assert_eq!(risk_bucket(6), "Medium Risk - Moderate Diversification");
        assert_eq!(risk_bucket(7), "Lower Risk - Well Diversified");
    }
}
