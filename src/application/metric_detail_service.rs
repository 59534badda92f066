// Metric detail service - Use case for building a metric detail page
use crate::application::metric_detail_view::MetricDetailView;
use crate::application::noise_source::NoiseSource;
use crate::domain::filter::{DateInterval, DateRangeMode};
use crate::domain::hospital::HOSPITAL_ALL;
use crate::domain::metric::{MetricCatalog, MetricDescriptor};
use crate::domain::metric_detail::MetricDetail;
use crate::domain::robot::{RobotType, RobotTypeFilter, ROBOT_TYPE_ALL};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::sync::Arc;

const DATE_FORMAT: &str = "%Y-%m-%d";
/// Longest explicit interval served, in days between its ends.
const MAX_INTERVAL_DAYS: i64 = 366;

/// Raw page parameters as they arrive from the URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailParams {
    pub hospital: Option<String>,
    pub range: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub robot_types: Option<String>,
}

#[derive(Clone)]
pub struct MetricDetailService {
    catalog: MetricCatalog,
    hospitals: Vec<String>,
    noise: Arc<dyn NoiseSource>,
}

impl MetricDetailService {
    pub fn new(catalog: MetricCatalog, hospitals: Vec<String>, noise: Arc<dyn NoiseSource>) -> Self {
        Self {
            catalog,
            hospitals,
            noise,
        }
    }

    /// Hospital filter options, sentinel first.
    pub fn list_hospitals(&self) -> Vec<String> {
        std::iter::once(HOSPITAL_ALL.to_string())
            .chain(self.hospitals.iter().cloned())
            .collect()
    }

    /// Robot type filter options, sentinel first.
    pub fn list_robot_types(&self) -> Vec<String> {
        std::iter::once(ROBOT_TYPE_ALL)
            .chain(RobotType::ALL.iter().map(RobotType::name))
            .map(str::to_string)
            .collect()
    }

    pub fn list_metrics(&self) -> &[MetricDescriptor] {
        self.catalog.metrics()
    }

    /// Build the page for `metric_id` as of `now`.
    ///
    /// Unrecognised parameters are dropped and the matching default is used.
    pub fn metric_detail(
        &self,
        metric_id: Option<&str>,
        params: &DetailParams,
        now: NaiveDateTime,
    ) -> MetricDetail {
        let mut view = MetricDetailView::open(metric_id, params.hospital.as_deref(), &self.hospitals);

        if let Some(range) = params.range.as_deref() {
            match DateRangeMode::parse(range) {
                Some(mode) => view.set_date_range(mode),
                None => tracing::warn!("Ignoring unknown date range: {}", range),
            }
        }

        view.set_interval(parse_interval(params.from.as_deref(), params.to.as_deref()));

        for raw in params
            .robot_types
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter(|s| !s.trim().is_empty())
        {
            match RobotTypeFilter::parse(raw) {
                Some(filter) => view.toggle_robot_type(filter),
                None => tracing::warn!("Ignoring unknown robot type: {}", raw),
            }
        }

        view.render(&self.catalog, now, self.noise.as_ref())
    }
}

/// Both ends must parse for the explicit interval to apply.
fn parse_interval(from: Option<&str>, to: Option<&str>) -> Option<DateInterval> {
    let from = parse_day(from?)?;
    let to = parse_day(to?)?;
    let span = (to - from).num_days();
    if span > MAX_INTERVAL_DAYS {
        tracing::warn!(
            "Ignoring interval {} to {}: spans {} days, limit is {}",
            from.date(),
            to.date(),
            span,
            MAX_INTERVAL_DAYS
        );
        return None;
    }
    Some(DateInterval::new(from, to))
}

fn parse_day(raw: &str) -> Option<NaiveDateTime> {
    match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
        Ok(day) => Some(day.and_time(chrono::NaiveTime::MIN)),
        Err(e) => {
            tracing::warn!("Ignoring unparseable date {}: {}", raw, e);
            None
        }
    }
}
