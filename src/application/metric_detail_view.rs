// Metric detail view - Filter state plus memoised derived data
use crate::application::noise_source::NoiseSource;
use crate::application::series_generator::{generate_series, SeriesRequest};
use crate::application::summary_generator::robot_summaries;
use crate::domain::filter::{DateInterval, DateRangeMode, FilterState};
use crate::domain::hospital::HospitalSelection;
use crate::domain::metric::MetricCatalog;
use crate::domain::metric_detail::MetricDetail;
use crate::domain::robot::{RobotTypeFilter, RobotTypeSummary};
use crate::domain::time_series::TimeSeriesPoint;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
struct SummaryKey {
    metric_id: Option<String>,
    hospital: HospitalSelection,
}

#[derive(Debug, Clone, PartialEq)]
struct SeriesKey {
    metric_id: Option<String>,
    hospital: HospitalSelection,
    date_range: DateRangeMode,
    interval: Option<DateInterval>,
}

#[derive(Debug, Clone)]
struct Memo<K, V> {
    key: K,
    value: V,
}

fn recompute_if_stale<K: PartialEq, V>(
    slot: &mut Option<Memo<K, V>>,
    key: K,
    compute: impl FnOnce() -> V,
) -> &V {
    let memo = match slot.take() {
        Some(memo) if memo.key == key => memo,
        _ => Memo {
            value: compute(),
            key,
        },
    };
    &slot.insert(memo).value
}

/// State behind one metric detail page.
///
/// Holds the filters, follows the `hospital` URL parameter one way
/// (URL to state), and only regenerates summaries or chart rows when one of
/// their inputs changed.
#[derive(Debug, Clone)]
pub struct MetricDetailView {
    metric_id: Option<String>,
    hospitals: Vec<String>,
    url_hospital: Option<String>,
    filters: FilterState,
    summaries: Option<Memo<SummaryKey, Vec<RobotTypeSummary>>>,
    series: Option<Memo<SeriesKey, Vec<TimeSeriesPoint>>>,
}

impl MetricDetailView {
    /// Open the page for `metric_id`, honouring the `hospital` URL parameter
    /// when it names a known hospital (or the "All" sentinel).
    pub fn open(metric_id: Option<&str>, url_hospital: Option<&str>, hospitals: &[String]) -> Self {
        let hospital = url_hospital
            .and_then(|name| resolve_url_hospital(name, hospitals))
            .unwrap_or_else(|| default_hospital(hospitals));

        Self {
            metric_id: metric_id.map(str::to_string),
            hospitals: hospitals.to_vec(),
            url_hospital: url_hospital.map(str::to_string),
            filters: FilterState::new(hospital),
            summaries: None,
            series: None,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Follow a navigation to a different metric id.
    pub fn set_metric(&mut self, metric_id: Option<&str>) {
        self.metric_id = metric_id.map(str::to_string);
    }

    /// React to the URL's `hospital` parameter.
    ///
    /// Only a changed parameter naming a known hospital moves the selection;
    /// anything else leaves the current selection alone.
    pub fn sync_url_hospital(&mut self, url_hospital: Option<&str>) {
        if self.url_hospital.as_deref() == url_hospital {
            return;
        }
        self.url_hospital = url_hospital.map(str::to_string);

        match url_hospital.and_then(|name| resolve_url_hospital(name, &self.hospitals)) {
            Some(hospital) => self.filters.hospital = hospital,
            None => tracing::debug!("Keeping hospital {}, URL value not recognised", self.filters.hospital),
        }
    }

    pub fn select_hospital(&mut self, hospital: HospitalSelection) {
        self.filters.hospital = hospital;
    }

    pub fn toggle_robot_type(&mut self, filter: RobotTypeFilter) {
        self.filters.robot_types.toggle(filter);
    }

    pub fn remove_robot_type(&mut self, filter: RobotTypeFilter) {
        self.filters.robot_types.remove(filter);
    }

    pub fn set_date_range(&mut self, date_range: DateRangeMode) {
        self.filters.date_range = date_range;
    }

    pub fn set_interval(&mut self, interval: Option<DateInterval>) {
        self.filters.interval = interval;
    }

    /// Stat cards, regenerated when the metric or hospital changes.
    pub fn summaries(&mut self, noise: &dyn NoiseSource) -> &[RobotTypeSummary] {
        let key = SummaryKey {
            metric_id: self.metric_id.clone(),
            hospital: self.filters.hospital.clone(),
        };
        recompute_if_stale::<_, Vec<_>>(&mut self.summaries, key, || {
            tracing::debug!("Recomputing robot summaries for {:?} at {}", self.metric_id, self.filters.hospital);
            robot_summaries(self.metric_id.as_deref(), &self.filters.hospital, noise)
        })
    }

    /// Chart rows, regenerated when the metric, hospital, preset, or explicit interval changes.
    pub fn series(&mut self, now: NaiveDateTime, noise: &dyn NoiseSource) -> &[TimeSeriesPoint] {
        let key = SeriesKey {
            metric_id: self.metric_id.clone(),
            hospital: self.filters.hospital.clone(),
            date_range: self.filters.date_range,
            interval: self.filters.interval,
        };
        recompute_if_stale::<_, Vec<_>>(&mut self.series, key, || {
            tracing::debug!(
                "Recomputing series for {:?} ({})",
                self.metric_id,
                self.filters.date_range.label()
            );
            let request = SeriesRequest {
                metric_id: self.metric_id.as_deref(),
                hospital: &self.filters.hospital,
                date_range: self.filters.date_range,
                interval: self.filters.interval,
            };
            generate_series(&request, now, noise)
        })
    }

    /// Everything the page renders, in one payload.
    pub fn render(
        &mut self,
        catalog: &MetricCatalog,
        now: NaiveDateTime,
        noise: &dyn NoiseSource,
    ) -> MetricDetail {
        let metric = catalog.lookup(self.metric_id.as_deref());
        let summaries = self.summaries(noise).to_vec();
        let points = self.series(now, noise).to_vec();
        MetricDetail::new(metric, self.filters.clone(), summaries, points)
    }
}

fn resolve_url_hospital(name: &str, hospitals: &[String]) -> Option<HospitalSelection> {
    let resolved = HospitalSelection::resolve(name, hospitals);
    if resolved.is_none() {
        tracing::warn!("Ignoring unknown hospital in URL: {}", name);
    }
    resolved
}

fn default_hospital(hospitals: &[String]) -> HospitalSelection {
    hospitals
        .first()
        .map(|h| HospitalSelection::Site(h.clone()))
        .unwrap_or(HospitalSelection::All)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::noise_source::fixed::NoNoise;
    use crate::domain::robot::RobotType;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Counts draws so tests can tell whether a value was regenerated.
    #[derive(Default)]
    struct CountingNoise {
        draws: AtomicU32,
    }

    impl CountingNoise {
        fn draws(&self) -> u32 {
            self.draws.load(Ordering::SeqCst)
        }
    }

    impl NoiseSource for CountingNoise {
        fn below(&self, _bound: u32) -> u32 {
            self.draws.fetch_add(1, Ordering::SeqCst);
            1
        }

        fn fraction(&self) -> f64 {
            self.draws.fetch_add(1, Ordering::SeqCst);
            0.5
        }
    }

    fn hospitals() -> Vec<String> {
        vec![
            "Mayo Clinic Rochester".to_string(),
            "Mayo Clinic Phoenix".to_string(),
        ]
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(10, 0, 0).unwrap()
    }

    fn site(name: &str) -> HospitalSelection {
        HospitalSelection::Site(name.to_string())
    }

    #[test]
    fn test_open_defaults_to_first_hospital() {
        let view = MetricDetailView::open(Some("battery"), None, &hospitals());
        assert_eq!(view.filters().hospital, site("Mayo Clinic Rochester"));
        assert!(view.filters().robot_types.is_all());
        assert_eq!(view.filters().date_range, DateRangeMode::Last7Days);
        assert_eq!(view.filters().interval, None);
    }

    #[test]
    fn test_open_uses_url_hospital() {
        let view = MetricDetailView::open(Some("battery"), Some("Mayo Clinic Phoenix"), &hospitals());
        assert_eq!(view.filters().hospital, site("Mayo Clinic Phoenix"));

        let view = MetricDetailView::open(Some("battery"), Some("All"), &hospitals());
        assert_eq!(view.filters().hospital, HospitalSelection::All);
    }

    #[test]
    fn test_open_ignores_unknown_url_hospital() {
        let view = MetricDetailView::open(Some("battery"), Some("Springfield General"), &hospitals());
        assert_eq!(view.filters().hospital, site("Mayo Clinic Rochester"));
    }

    #[test]
    fn test_open_without_hospitals_aggregates() {
        let view = MetricDetailView::open(Some("battery"), None, &[]);
        assert_eq!(view.filters().hospital, HospitalSelection::All);
    }

    #[test]
    fn test_url_sync_is_one_way_and_change_driven() {
        let mut view = MetricDetailView::open(Some("battery"), Some("Mayo Clinic Phoenix"), &hospitals());

        // a local pick is not overwritten by an unchanged URL
        view.select_hospital(HospitalSelection::All);
        view.sync_url_hospital(Some("Mayo Clinic Phoenix"));
        assert_eq!(view.filters().hospital, HospitalSelection::All);

        view.sync_url_hospital(Some("Mayo Clinic Rochester"));
        assert_eq!(view.filters().hospital, site("Mayo Clinic Rochester"));

        view.sync_url_hospital(Some("Nowhere"));
        assert_eq!(view.filters().hospital, site("Mayo Clinic Rochester"));

        view.sync_url_hospital(None);
        assert_eq!(view.filters().hospital, site("Mayo Clinic Rochester"));
    }

    #[test]
    fn test_robot_type_wiring() {
        let mut view = MetricDetailView::open(Some("battery"), None, &hospitals());
        view.toggle_robot_type(RobotTypeFilter::Only(RobotType::CoBots));
        assert_eq!(
            view.filters().robot_types.entries(),
            &[RobotTypeFilter::Only(RobotType::CoBots)]
        );
        view.remove_robot_type(RobotTypeFilter::Only(RobotType::CoBots));
        assert!(view.filters().robot_types.is_all());
    }

    #[test]
    fn test_summaries_are_memoised_on_metric_and_hospital() {
        let noise = CountingNoise::default();
        let mut view = MetricDetailView::open(Some("downtime"), None, &hospitals());

        view.summaries(&noise);
        assert_eq!(noise.draws(), 3);

        // filters outside the dependency list do not regenerate
        view.set_date_range(DateRangeMode::Last30Days);
        view.toggle_robot_type(RobotTypeFilter::Only(RobotType::NurseBots));
        view.summaries(&noise);
        assert_eq!(noise.draws(), 3);

        view.select_hospital(HospitalSelection::All);
        view.summaries(&noise);
        assert_eq!(noise.draws(), 6);

        view.set_metric(Some("error-rate"));
        view.summaries(&noise);
        assert_eq!(noise.draws(), 9);
    }

    #[test]
    fn test_series_are_memoised_on_their_inputs() {
        let noise = CountingNoise::default();
        let mut view = MetricDetailView::open(Some("battery"), None, &hospitals());

        assert_eq!(view.series(now(), &noise).len(), 8);
        let after_first = noise.draws();
        assert_eq!(after_first, 8 * 3);

        view.toggle_robot_type(RobotTypeFilter::Only(RobotType::AutonomousBeds));
        view.series(now(), &noise);
        assert_eq!(noise.draws(), after_first);

        view.set_date_range(DateRangeMode::Last30Days);
        assert_eq!(view.series(now(), &noise).len(), 31);

        let from = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap().and_hms_opt(0, 0, 0).unwrap();
        view.set_interval(Some(DateInterval::new(from, to)));
        assert_eq!(view.series(now(), &noise).len(), 3);

        view.set_date_range(DateRangeMode::Today);
        assert_eq!(view.series(now(), &noise).len(), 24);
    }

    #[test]
    fn test_render_assembles_page() {
        let mut view = MetricDetailView::open(Some("utilization"), Some("All"), &hospitals());
        let detail = view.render(&MetricCatalog::default(), now(), &NoNoise);
        assert_eq!(detail.metric.title, "Utilization Rate");
        assert_eq!(detail.heading, "Utilization Rate (All Hospitals)");
        assert_eq!(detail.summaries[0], RobotTypeSummary::new(RobotType::NurseBots, 185, 195));
        assert_eq!(detail.chart.points.len(), 8);
    }

    #[test]
    fn test_render_unknown_metric() {
        let mut view = MetricDetailView::open(None, None, &hospitals());
        let detail = view.render(&MetricCatalog::default(), now(), &NoNoise);
        assert_eq!(detail.heading, "Unknown Metric");
    }
}
