use serde::Serialize;

/// Valuation of a single holding against its live quote.
#[derive(Debug, Clone, Serialize)]
pub struct HoldingValuation {
    pub symbol: String,
    pub shares: f64,
    pub purchase_price: f64,
    pub current_price: f64,
    pub cost_basis: f64,
    pub current_value: f64,
    pub profit_loss: f64,
    pub profit_loss_percentage: f64,
}

/// Aggregate portfolio performance. Holdings whose quote lookup failed are
/// excluded from the totals; the diversification score and risk bucket are
/// derived from the full holding count.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioAnalysis {
    pub total_value: f64,
    pub total_cost: f64,
    pub total_profit_loss: f64,
    pub profit_loss_percentage: f64,
    pub diversification_score: f64,
    pub risk_assessment: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioAiAnalysis {
    pub total_value: f64,
    pub analysis: String,
    pub stocks_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalProgress {
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub percent_complete: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinanceSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
    pub portfolio_value: f64,
    pub goals: Vec<GoalProgress>,
}
