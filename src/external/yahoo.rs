use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;

use crate::external::market_provider::{
    MarketError, MarketProvider, PriceHistory, Quote, SymbolInfo,
};

const VALID_PERIODS: [&str; 8] = ["1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y"];

pub struct YahooProvider {
    client: reqwest::Client,
}

impl YahooProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_chart(&self, symbol: &str, range: &str) -> Result<ChartResult, MarketError> {
        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{symbol}?range={range}&interval=1d"
        );

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketError::RateLimited);
        }

        let body = resp
            .json::<ChartResponse>()
            .await
            .map_err(|e| MarketError::Parse(e.to_string()))?;

        body.chart
            .result
            .and_then(|mut r| r.pop())
            .ok_or_else(|| MarketError::BadResponse("missing result".into()))
    }
}

// Minimal response structs (only what we need)
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    symbol: String,
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
    #[serde(rename = "chartPreviousClose")]
    chart_previous_close: Option<f64>,
    #[serde(rename = "regularMarketDayHigh")]
    regular_market_day_high: Option<f64>,
    #[serde(rename = "regularMarketDayLow")]
    regular_market_day_low: Option<f64>,
    #[serde(rename = "regularMarketVolume")]
    regular_market_volume: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<IndicatorQuote>,
}

#[derive(Debug, Deserialize)]
struct IndicatorQuote {
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<i64>>>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    result: Option<Vec<SummaryResult>>,
}

#[derive(Debug, Deserialize)]
struct SummaryResult {
    #[serde(rename = "assetProfile")]
    asset_profile: Option<AssetProfile>,
    price: Option<PriceModule>,
    #[serde(rename = "summaryDetail")]
    summary_detail: Option<SummaryDetail>,
}

#[derive(Debug, Deserialize)]
struct AssetProfile {
    sector: Option<String>,
    industry: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PriceModule {
    #[serde(rename = "longName")]
    long_name: Option<String>,
    #[serde(rename = "shortName")]
    short_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SummaryDetail {
    #[serde(rename = "marketCap")]
    market_cap: Option<RawNum>,
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<RawNum>,
    #[serde(rename = "dividendYield")]
    dividend_yield: Option<RawNum>,
    #[serde(rename = "fiftyTwoWeekHigh")]
    fifty_two_week_high: Option<RawNum>,
    #[serde(rename = "fiftyTwoWeekLow")]
    fifty_two_week_low: Option<RawNum>,
}

// Yahoo wraps numeric fields as {raw, fmt}
#[derive(Debug, Deserialize)]
struct RawNum {
    raw: Option<f64>,
}

#[async_trait]
impl MarketProvider for YahooProvider {
    async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketError> {
        let result = self.fetch_chart(symbol, "1d").await?;

        let last_close = result
            .indicators
            .quote
            .first()
            .and_then(|q| q.close.as_ref())
            .and_then(|closes| closes.iter().rev().find_map(|c| *c));

        let current_price = result
            .meta
            .regular_market_price
            .or(last_close)
            .ok_or_else(|| MarketError::BadResponse("no price in response".into()))?;

        let change_percent = match result.meta.chart_previous_close {
            Some(prev) if prev > 0.0 => (current_price - prev) / prev * 100.0,
            _ => 0.0,
        };

        Ok(Quote {
            symbol: result.meta.symbol.to_uppercase(),
            current_price,
            change_percent,
            day_high: result.meta.regular_market_day_high.unwrap_or(current_price),
            day_low: result.meta.regular_market_day_low.unwrap_or(current_price),
            volume: result.meta.regular_market_volume.unwrap_or(0),
        })
    }

    async fn get_history(&self, symbol: &str, period: &str) -> Result<PriceHistory, MarketError> {
        let range = if VALID_PERIODS.contains(&period) { period } else { "1mo" };
        let result = self.fetch_chart(symbol, range).await?;

        let timestamps = result.timestamp.unwrap_or_default();
        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| MarketError::BadResponse("missing quote".into()))?;
        let closes = quote.close.unwrap_or_default();
        let volumes = quote.volume.unwrap_or_default();

        let mut history = PriceHistory {
            symbol: symbol.to_uppercase(),
            dates: Vec::new(),
            prices: Vec::new(),
            volumes: Vec::new(),
        };

        for (i, ts) in timestamps.iter().enumerate() {
            // skip days with no close
            let Some(close) = closes.get(i).and_then(|c| *c) else { continue };

            let dt = DateTime::from_timestamp(*ts, 0)
                .ok_or_else(|| MarketError::Parse("bad timestamp".into()))?;

            history.dates.push(dt.format("%Y-%m-%d").to_string());
            history.prices.push(close);
            history
                .volumes
                .push(volumes.get(i).and_then(|v| *v).unwrap_or(0));
        }

        Ok(history)
    }

    async fn get_info(&self, symbol: &str) -> Result<SymbolInfo, MarketError> {
        let url = format!(
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{symbol}?modules=assetProfile,price,summaryDetail"
        );

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MarketError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketError::RateLimited);
        }

        let body = resp
            .json::<QuoteSummaryResponse>()
            .await
            .map_err(|e| MarketError::Parse(e.to_string()))?;

        let result = body
            .quote_summary
            .result
            .and_then(|mut r| r.pop())
            .ok_or_else(|| MarketError::BadResponse("missing result".into()))?;

        let profile = result.asset_profile;
        let detail = result.summary_detail;

        let name = result
            .price
            .and_then(|p| p.long_name.or(p.short_name))
            .unwrap_or_else(|| symbol.to_uppercase());

        Ok(SymbolInfo {
            symbol: symbol.to_uppercase(),
            name,
            sector: profile.as_ref().and_then(|p| p.sector.clone()),
            industry: profile.as_ref().and_then(|p| p.industry.clone()),
            market_cap: detail.as_ref().and_then(|d| d.market_cap.as_ref()).and_then(|n| n.raw),
            pe_ratio: detail.as_ref().and_then(|d| d.trailing_pe.as_ref()).and_then(|n| n.raw),
            dividend_yield: detail
                .as_ref()
                .and_then(|d| d.dividend_yield.as_ref())
                .and_then(|n| n.raw),
            week_52_high: detail
                .as_ref()
                .and_then(|d| d.fifty_two_week_high.as_ref())
                .and_then(|n| n.raw),
            week_52_low: detail
                .as_ref()
                .and_then(|d| d.fifty_two_week_low.as_ref())
                .and_then(|n| n.raw),
        })
    }
}
