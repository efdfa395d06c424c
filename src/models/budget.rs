use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const ENTRY_TYPE_INCOME: &str = "income";
pub const ENTRY_TYPE_EXPENSE: &str = "expense";

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct BudgetEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub entry_date: DateTime<Utc>,
}

impl BudgetEntry {
    pub(crate) fn new(user_id: Uuid, category: String, amount: f64, entry_type: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            category,
            amount,
            entry_type,
            entry_date: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateBudgetEntry {
    pub category: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub entry_type: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct FinancialGoal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl FinancialGoal {
    pub(crate) fn new(user_id: Uuid, name: String, target_amount: f64, deadline: Option<DateTime<Utc>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            target_amount,
            current_amount: 0.0,
            deadline,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateGoal {
    pub name: String,
    pub target_amount: f64,
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateGoalProgress {
    pub current_amount: f64,
}
