use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::external::market_provider::MarketProvider;
use crate::models::{
    BudgetEntry, CreateBudgetEntry, CreateGoal, FinanceSummary, FinancialGoal, GoalProgress,
    UpdateGoalProgress, ENTRY_TYPE_EXPENSE, ENTRY_TYPE_INCOME,
};
use crate::services::auth_service;
use crate::utils::round2;

pub async fn add_entry(
    pool: &PgPool,
    user_id: Uuid,
    input: CreateBudgetEntry,
) -> Result<BudgetEntry, AppError> {
    if input.category.trim().is_empty() {
        return Err(AppError::Validation("Category cannot be empty".into()));
    }
    if input.amount.is_nan() || input.amount <= 0.0 {
        return Err(AppError::Validation("Amount must be positive".into()));
    }
    if input.entry_type != ENTRY_TYPE_INCOME && input.entry_type != ENTRY_TYPE_EXPENSE {
        return Err(AppError::Validation(
            "Type must be 'income' or 'expense'".into(),
        ));
    }

    let entry = BudgetEntry::new(user_id, input.category, input.amount, input.entry_type);
    db::budget_queries::insert(pool, &entry).await?;
    Ok(entry)
}

pub async fn list_entries(pool: &PgPool, user_id: Uuid) -> Result<Vec<BudgetEntry>, AppError> {
    Ok(db::budget_queries::fetch_by_user(pool, user_id).await?)
}

pub async fn create_goal(
    pool: &PgPool,
    user_id: Uuid,
    input: CreateGoal,
) -> Result<FinancialGoal, AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::Validation("Goal name cannot be empty".into()));
    }
    if input.target_amount.is_nan() || input.target_amount <= 0.0 {
        return Err(AppError::Validation("Target amount must be positive".into()));
    }

    let goal = FinancialGoal::new(user_id, input.name, input.target_amount, input.deadline);
    db::goal_queries::insert(pool, &goal).await?;
    Ok(goal)
}

pub async fn list_goals(pool: &PgPool, user_id: Uuid) -> Result<Vec<FinancialGoal>, AppError> {
    Ok(db::goal_queries::fetch_by_user(pool, user_id).await?)
}

pub async fn update_goal_progress(
    pool: &PgPool,
    user_id: Uuid,
    goal_id: Uuid,
    input: UpdateGoalProgress,
) -> Result<FinancialGoal, AppError> {
    if input.current_amount.is_nan() || input.current_amount < 0.0 {
        return Err(AppError::Validation("Current amount cannot be negative".into()));
    }
    let goal = db::goal_queries::fetch_one(pool, goal_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Goal not found".to_string()))?;
    auth_service::ensure_owner(goal.user_id, user_id)?;
    db::goal_queries::update_progress(pool, goal_id, input.current_amount)
        .await?
        .ok_or_else(|| AppError::NotFound("Goal not found".to_string()))
}

/// Income/expense totals plus the live market value of the portfolio.
/// Quote failures drop the affected holding from the portfolio value, the
/// same tolerance the valuation engine applies.
pub async fn summary(
    pool: &PgPool,
    market: &dyn MarketProvider,
    user_id: Uuid,
) -> Result<FinanceSummary, AppError> {
    let entries = db::budget_queries::fetch_by_user(pool, user_id).await?;
    let (total_income, total_expenses) = totals(&entries);

    let holdings = match db::portfolio_queries::fetch_by_user(pool, user_id).await? {
        Some(portfolio) => db::holding_queries::fetch_by_portfolio(pool, portfolio.id).await?,
        None => Vec::new(),
    };

    let mut portfolio_value = 0.0;
    for holding in &holdings {
        if let Ok(quote) = market.get_quote(&holding.symbol).await {
            portfolio_value += holding.shares * quote.current_price;
        }
    }

    let goals = db::goal_queries::fetch_by_user(pool, user_id)
        .await?
        .into_iter()
        .map(goal_progress)
        .collect();

    Ok(FinanceSummary {
        total_income: round2(total_income),
        total_expenses: round2(total_expenses),
        net_balance: round2(total_income - total_expenses),
        portfolio_value: round2(portfolio_value),
        goals,
    })
}

fn totals(entries: &[BudgetEntry]) -> (f64, f64) {
    let total_income = entries
        .iter()
        .filter(|e| e.entry_type == ENTRY_TYPE_INCOME)
        .map(|e| e.amount)
        .sum();
    let total_expenses = entries
        .iter()
        .filter(|e| e.entry_type == ENTRY_TYPE_EXPENSE)
        .map(|e| e.amount)
        .sum();
    (total_income, total_expenses)
}

fn goal_progress(goal: FinancialGoal) -> GoalProgress {
    let percent_complete = if goal.target_amount > 0.0 {
        round2(goal.current_amount / goal.target_amount * 100.0)
    } else {
        0.0
    };
    GoalProgress {
        name: goal.name,
        target_amount: goal.target_amount,
        current_amount: goal.current_amount,
        percent_complete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(entry_type: &str, amount: f64) -> BudgetEntry {
        BudgetEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            category: "misc".to_string(),
            amount,
            entry_type: entry_type.to_string(),
            entry_date: Utc::now(),
        }
    }

    #[test]
    fn test_totals_split_by_type() {
        let entries = vec![
            entry(ENTRY_TYPE_INCOME, 3000.0),
            entry(ENTRY_TYPE_EXPENSE, 1200.0),
            entry(ENTRY_TYPE_EXPENSE, 300.5),
            entry(ENTRY_TYPE_INCOME, 150.0),
        ];
        let (income, expenses) = totals(&entries);
        assert_eq!(income, 3150.0);
        assert_eq!(expenses, 1500.5);
    }

    #[test]
    fn test_goal_progress_percentage() {
        let goal = FinancialGoal {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Emergency fund".to_string(),
            target_amount: 10000.0,
            current_amount: 2500.0,
            deadline: None,
            created_at: Utc::now(),
        };
        let progress = goal_progress(goal);
        assert_eq!(progress.percent_complete, 25.0);
    }

    #[test]
    fn test_goal_progress_zero_target_guarded() {
        let goal = FinancialGoal {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Broken".to_string(),
            target_amount: 0.0,
            current_amount: 100.0,
            deadline: None,
            created_at: Utc::now(),
        };
        assert_eq!(goal_progress(goal).percent_complete, 0.0);
    }
}
