use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{ai, auth, budget, health, portfolio, profile};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api", auth::router())
        .nest("/api", ai::router())
        .nest("/api", budget::router())
        .nest("/api/profile", profile::router())
        .nest("/api/portfolio", portfolio::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
