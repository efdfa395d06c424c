use std::collections::HashMap;

use tracing::warn;

use crate::external::market_provider::MarketProvider;
use crate::models::{Holding, HoldingMarketData, RiskLevel, RiskReport};
use crate::utils::round2;

/// Sector-concentration risk assessment. Holdings are bucketed by sector
/// ("Unknown" when the info lookup failed), weighted by market value.
///
/// The diversification score here is the sector-diversity ratio
/// `distinct sectors / holding count * 100` — deliberately a different
/// heuristic from the position-count score used in portfolio valuation.
pub fn assess(holdings: &[Holding], market_data: &[HoldingMarketData]) -> RiskReport {
    let mut sectors: HashMap<String, f64> = HashMap::new();
    let mut total_value = 0.0;

    for (holding, data) in holdings.iter().zip(market_data) {
        // No price means the holding contributes no value to any sector
        let Some(price) = data.price else { continue };
        let sector = data.sector.clone().unwrap_or_else(|| "Unknown".to_string());
        let value = holding.shares * price;
        *sectors.entry(sector).or_insert(0.0) += value;
        total_value += value;
    }

    if total_value == 0.0 {
        return RiskReport {
            diversification_score: 0.0,
            risk_level: RiskLevel::Unknown,
            sector_allocation: HashMap::new(),
            total_value: 0.0,
        };
    }

    let diversification_score = round2(sectors.len() as f64 / holdings.len().max(1) as f64 * 100.0);

    let sector_allocation = sectors
        .into_iter()
        .map(|(sector, value)| (sector, round2(value / total_value * 100.0)))
        .collect();

    RiskReport {
        diversification_score,
        risk_level: RiskLevel::from_score(diversification_score),
        sector_allocation,
        total_value: round2(total_value),
    }
}

/// Fetch sector and price per holding, degrading each failed lookup to
/// `None`, then fold into a report.
pub async fn assess_portfolio(market: &dyn MarketProvider, holdings: &[Holding]) -> RiskReport {
    let mut market_data = Vec::with_capacity(holdings.len());
    for holding in holdings {
        let sector = match market.get_info(&holding.symbol).await {
            Ok(info) => info.sector,
            Err(e) => {
                warn!("Info unavailable for {}: {}", holding.symbol, e);
                None
            }
        };
        let price = match market.get_quote(&holding.symbol).await {
            Ok(quote) => Some(quote.current_price),
            Err(e) => {
                warn!("Quote unavailable for {}: {}", holding.symbol, e);
                None
            }
        };
        market_data.push(HoldingMarketData { price, sector });
    }
    assess(holdings, &market_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn holding(symbol: &str, shares: f64) -> Holding {
        Holding {
            id: Uuid::new_v4(),
            portfolio_id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            shares,
            purchase_price: 100.0,
            purchase_date: Utc::now(),
        }
    }

    fn data(price: f64, sector: &str) -> HoldingMarketData {
        HoldingMarketData {
            price: Some(price),
            sector: Some(sector.to_string()),
        }
    }

    #[test]
    fn test_sector_diversity_ratio() {
        let holdings = vec![holding("AAPL", 1.0), holding("MSFT", 1.0), holding("XOM", 1.0)];
        let market_data = vec![
            data(100.0, "Technology"),
            data(100.0, "Technology"),
            data(100.0, "Energy"),
        ];

        let report = assess(&holdings, &market_data);
        // 2 distinct sectors over 3 holdings
        assert_eq!(report.diversification_score, 66.67);
        assert_eq!(report.risk_level, RiskLevel::Medium);
        assert_eq!(report.total_value, 300.0);
    }

    #[test]
    fn test_sector_allocation_percentages() {
        let holdings = vec![holding("AAPL", 3.0), holding("XOM", 1.0)];
        let market_data = vec![data(100.0, "Technology"), data(100.0, "Energy")];

        let report = assess(&holdings, &market_data);
        assert_eq!(report.sector_allocation.get("Technology"), Some(&75.0));
        assert_eq!(report.sector_allocation.get("Energy"), Some(&25.0));
    }

    #[test]
    fn test_zero_total_value_is_unknown() {
        let holdings = vec![holding("AAPL", 1.0), holding("XOM", 1.0)];
        let market_data = vec![HoldingMarketData::default(), HoldingMarketData::default()];

        let report = assess(&holdings, &market_data);
        assert_eq!(report.diversification_score, 0.0);
        assert_eq!(report.risk_level, RiskLevel::Unknown);
        assert!(report.sector_allocation.is_empty());
        assert_eq!(report.total_value, 0.0);
    }

    #[test]
    fn test_missing_sector_defaults_to_unknown() {
        let holdings = vec![holding("MYST", 2.0)];
        let market_data = vec![HoldingMarketData {
            price: Some(50.0),
            sector: None,
        }];

        let report = assess(&holdings, &market_data);
        assert_eq!(report.sector_allocation.get("Unknown"), Some(&100.0));
        assert_eq!(report.total_value, 100.0);
    }

    #[test]
    fn test_unpriced_holding_excluded_from_value() {
        let holdings = vec![holding("AAPL", 1.0), holding("GONE", 1.0)];
        let market_data = vec![
            data(200.0, "Technology"),
            HoldingMarketData {
                price: None,
                sector: Some("Energy".to_string()),
            },
        ];

        let report = assess(&holdings, &market_data);
        assert_eq!(report.total_value, 200.0);
        // Energy never got a value, so only one sector over two holdings
        assert_eq!(report.diversification_score, 50.0);
        assert_eq!(report.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_single_sector_is_high_risk() {
        let holdings = vec![holding("AAPL", 1.0), holding("MSFT", 1.0), holding("GOOG", 1.0)];
        let market_data = vec![
            data(100.0, "Technology"),
            data(100.0, "Technology"),
            data(100.0, "Technology"),
        ];

        let report = assess(&holdings, &market_data);
        assert_eq!(report.diversification_score, 33.33);
        assert_eq!(report.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_risk_level_boundaries() {
        assert_eq!(RiskLevel::from_score(80.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(70.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(41.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(40.0), RiskLevel::High);
    }
}
