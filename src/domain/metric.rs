// Metric catalog domain model
use serde::Serialize;

pub const UNKNOWN_METRIC_TITLE: &str = "Unknown Metric";

pub const DOWNTIME: &str = "downtime";
pub const ERROR_RATE: &str = "error-rate";

const KNOWN_METRICS: [(&str, &str); 9] = [
    ("utilization", "Utilization Rate"),
    ("mission-time", "Mission Time"),
    ("active-time", "Active Time"),
    (ERROR_RATE, "Error Rate"),
    ("battery", "Battery Health"),
    ("miles-saved", "Miles Saved"),
    ("hours-saved", "Hours Saved"),
    ("completed-missions", "Completed Missions"),
    (DOWNTIME, "Downtime"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricDescriptor {
    pub id: String,
    pub title: String,
}

impl MetricDescriptor {
    pub fn new(id: String, title: String) -> Self {
        Self { id, title }
    }
}

#[derive(Debug, Clone)]
pub struct MetricCatalog {
    metrics: Vec<MetricDescriptor>,
}

impl Default for MetricCatalog {
    fn default() -> Self {
        let metrics = KNOWN_METRICS
            .iter()
            .map(|(id, title)| MetricDescriptor::new(id.to_string(), title.to_string()))
            .collect();
        Self { metrics }
    }
}

impl MetricCatalog {
    pub fn metrics(&self) -> &[MetricDescriptor] {
        &self.metrics
    }

    /// Look up a metric by id; anything unknown (or missing) gets the fallback title.
    pub fn lookup(&self, id: Option<&str>) -> MetricDescriptor {
        let id = id.unwrap_or_default();
        self.metrics
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .unwrap_or_else(|| MetricDescriptor::new(id.to_string(), UNKNOWN_METRIC_TITLE.to_string()))
    }
}

/// Metrics whose active counts are jittered downwards.
pub fn reduces_active_count(metric_id: &str) -> bool {
    metric_id == DOWNTIME || metric_id == ERROR_RATE
}
