use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub(crate) fn new(user_id: Uuid, message: &str, response: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            message: message.to_string(),
            response: response.to_string(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}
