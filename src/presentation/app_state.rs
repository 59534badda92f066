// Application state for HTTP handlers
use crate::application::metric_detail_service::MetricDetailService;

#[derive(Clone)]
pub struct AppState {
    pub metric_detail_service: MetricDetailService,
}
