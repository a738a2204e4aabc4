// HTTP request handlers
use crate::infrastructure::chartjs_mapper::{
    binding_to_response, dashboard_to_response, ChartResponse, DashboardResponse,
};
use crate::presentation::app_state::AppState;
use crate::presentation::error::ApiError;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Every configured chart for one page load
pub async fn dashboard_charts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let dashboard = state.chart_service.dashboard().await?;
    Ok(Json(dashboard_to_response(dashboard)))
}

/// A single metric family's chart
pub async fn family_chart(
    Path(family): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChartResponse>, ApiError> {
    let binding = state.chart_service.chart(&family).await?;
    Ok(Json(binding_to_response(binding)))
}
