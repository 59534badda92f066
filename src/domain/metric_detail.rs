// Metric detail page model
use super::filter::FilterState;
use super::metric::MetricDescriptor;
use super::robot::{RobotType, RobotTypeSummary};
use super::time_series::TimeSeriesPoint;
use serde::Serialize;

pub const CHART_TITLE: &str = "Performance Over Time";
pub const BACK_LINK: &str = "/";
const ALL_HOSPITALS_SUFFIX: &str = " (All Hospitals)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesDescriptor {
    pub key: &'static str,
    pub color: &'static str,
}

impl SeriesDescriptor {
    pub fn for_robot_type(robot_type: RobotType) -> Self {
        Self {
            key: robot_type.name(),
            color: robot_type.color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: &'static str,
    pub series: Vec<SeriesDescriptor>,
    pub points: Vec<TimeSeriesPoint>,
}

impl Chart {
    pub fn new(points: Vec<TimeSeriesPoint>) -> Self {
        Self {
            title: CHART_TITLE,
            series: RobotType::ALL
                .into_iter()
                .map(SeriesDescriptor::for_robot_type)
                .collect(),
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDetail {
    pub metric: MetricDescriptor,
    pub heading: String,
    pub filters: FilterState,
    pub summaries: Vec<RobotTypeSummary>,
    pub chart: Chart,
    pub back_link: &'static str,
}

impl MetricDetail {
    pub fn new(
        metric: MetricDescriptor,
        filters: FilterState,
        summaries: Vec<RobotTypeSummary>,
        points: Vec<TimeSeriesPoint>,
    ) -> Self {
        let heading = if filters.hospital.is_all() {
            format!("{}{}", metric.title, ALL_HOSPITALS_SUFFIX)
        } else {
            metric.title.clone()
        };
        Self {
            metric,
            heading,
            filters,
            summaries,
            chart: Chart::new(points),
            back_link: BACK_LINK,
        }
    }
}
