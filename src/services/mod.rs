pub(crate) mod advice_service;
pub(crate) mod auth_service;
pub(crate) mod budget_service;
pub(crate) mod password_service;
pub(crate) mod portfolio_service;
pub(crate) mod risk_service;
pub(crate) mod token_service;
pub(crate) mod valuation_service;
