// Presentation layer - HTTP handlers and routing
pub mod app_state;
pub mod error;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{health_check, history, list_vehicles, metrics, statistics};
use axum::{Router, routing::get};
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/vehicles", get(list_vehicles))
        .route("/history", get(history))
        .route("/metrics", get(metrics))
        .route("/statistics", get(statistics))
        .with_state(state)
}
