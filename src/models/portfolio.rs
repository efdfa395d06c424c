use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Each user has at most one portfolio, created lazily on the first holding add.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Portfolio {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Portfolio {
    pub(crate) fn new(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: "My Portfolio".to_string(),
            created_at: Utc::now(),
        }
    }
}

// One stock position inside a portfolio. Only `shares` and `purchase_price`
// are editable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Holding {
    pub id: Uuid,
    pub portfolio_id: Uuid,
    pub symbol: String,
    pub shares: f64,
    pub purchase_price: f64,
    pub purchase_date: DateTime<Utc>,
}

impl Holding {
    pub(crate) fn new(portfolio_id: Uuid, symbol: String, shares: f64, purchase_price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            portfolio_id,
            symbol,
            shares,
            purchase_price,
            purchase_date: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateHolding {
    pub symbol: String,
    pub shares: f64,
    pub purchase_price: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateHolding {
    pub shares: f64,
    pub purchase_price: f64,
}
