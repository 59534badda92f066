// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    health_check, list_hospitals, list_metrics, list_robot_types, metric_detail,
};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/hospitals", get(list_hospitals))
        .route("/robot-types", get(list_robot_types))
        .route("/metrics", get(list_metrics))
        .route("/metrics/:metric_id", get(metric_detail))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
