// backend/services/orders/api/src/routes/mod.rs

pub mod health;
pub mod orders;

use crate::state::AppState;
use axum::Router;
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .with_state(state)
}
