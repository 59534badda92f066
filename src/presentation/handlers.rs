// HTTP request handlers
use crate::application::metric_detail_service::DetailParams;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

async fn respond<T: Serialize>(data: &T, headers: &HeaderMap) -> Response {
    match json_response(data, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Hospital filter options
pub async fn list_hospitals(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    respond(&state.metric_detail_service.list_hospitals(), &headers).await
}

/// Robot type filter options
pub async fn list_robot_types(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    respond(&state.metric_detail_service.list_robot_types(), &headers).await
}

/// Metric catalog
pub async fn list_metrics(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    respond(&state.metric_detail_service.list_metrics(), &headers).await
}

/// Detail page payload for one metric
pub async fn metric_detail(
    Path(metric_id): Path<String>,
    Query(params): Query<DetailParams>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let now = chrono::Local::now().naive_local();
    let detail = state
        .metric_detail_service
        .metric_detail(Some(&metric_id), &params, now);

    tracing::debug!(
        "Built {} for {} ({} rows)",
        detail.metric.id,
        detail.filters.hospital,
        detail.chart.points.len()
    );

    respond(&detail, &headers).await
}
