// HTTP request handlers
use crate::application::error::ServiceError;
use crate::application::history_service::HistoryQuery;
use crate::domain::dashboard::{HistoryPage, MetricsOverview, StatisticsDashboard};
use crate::domain::fillup::Vehicle;
use crate::domain::stats::StatsWindow;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use std::sync::Arc;

type ApiResult<T> = Result<Json<T>, ServiceError>;

#[derive(Debug, Default, Deserialize)]
pub struct WindowQuery {
    pub window: Option<String>,
    pub vehicle: Option<String>,
}

impl WindowQuery {
    fn window(&self) -> StatsWindow {
        StatsWindow::from_param(self.window.as_deref())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List all vehicles, sorted by name
pub async fn list_vehicles(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Vehicle>> {
    Ok(Json(state.vehicle_service.list_vehicles().await?))
}

/// One page of the fill-up history
pub async fn history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<HistoryPage> {
    Ok(Json(state.history_service.history(&query).await?))
}

/// Rolling-window and all-time metrics
pub async fn metrics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WindowQuery>,
) -> ApiResult<MetricsOverview> {
    let overview = state
        .statistics_service
        .metrics_overview(query.vehicle.as_deref(), query.window(), today())
        .await?;
    Ok(Json(overview))
}

/// Statistics dashboard with charts and the brand/grade table
pub async fn statistics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WindowQuery>,
) -> ApiResult<StatisticsDashboard> {
    let dashboard = state
        .statistics_service
        .statistics_dashboard(query.vehicle.as_deref(), query.window(), today())
        .await?;
    Ok(Json(dashboard))
}
