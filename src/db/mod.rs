pub(crate) mod budget_queries;
pub(crate) mod chat_queries;
pub(crate) mod goal_queries;
pub(crate) mod holding_queries;
pub(crate) mod portfolio_queries;
pub(crate) mod user_queries;
