use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unknown,
}

impl RiskLevel {
    /// Bucket a sector-diversity score: >70 Low, >40 Medium, otherwise High.
    pub fn from_score(score: f64) -> Self {
        if score > 70.0 {
            RiskLevel::Low
        } else if score > 40.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

/// Per-holding market inputs for risk assessment. Either lookup may have
/// failed independently; a missing price excludes the holding from sector
/// totals, a missing sector falls back to "Unknown".
#[derive(Debug, Clone, Default)]
pub struct HoldingMarketData {
    pub price: Option<f64>,
    pub sector: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskReport {
    pub diversification_score: f64,
    pub risk_level: RiskLevel,
    pub sector_allocation: HashMap<String, f64>,
    pub total_value: f64,
}
