// Dashboard filter state
use super::hospital::HospitalSelection;
use super::robot::RobotTypeSelection;
use chrono::{Duration, NaiveDateTime};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateRangeMode {
    Today,
    #[default]
    Last7Days,
    Last30Days,
    Last90Days,
}

impl DateRangeMode {
    pub const ALL: [DateRangeMode; 4] = [
        DateRangeMode::Today,
        DateRangeMode::Last7Days,
        DateRangeMode::Last30Days,
        DateRangeMode::Last90Days,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DateRangeMode::Today => "Today",
            DateRangeMode::Last7Days => "Last 7 Days",
            DateRangeMode::Last30Days => "Last 30 Days",
            DateRangeMode::Last90Days => "Last 90 Days",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == label.trim())
    }

    /// Days subtracted from "now" to find the window start.
    pub fn days_back(&self) -> i64 {
        match self {
            DateRangeMode::Today => 0,
            DateRangeMode::Last7Days => 7,
            DateRangeMode::Last30Days => 30,
            DateRangeMode::Last90Days => 90,
        }
    }
}

impl Serialize for DateRangeMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Closed `[from, to]` interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateInterval {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl DateInterval {
    pub fn new(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        Self { from, to }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterState {
    pub hospital: HospitalSelection,
    pub robot_types: RobotTypeSelection,
    pub date_range: DateRangeMode,
    pub interval: Option<DateInterval>,
}

impl FilterState {
    pub fn new(hospital: HospitalSelection) -> Self {
        Self {
            hospital,
            robot_types: RobotTypeSelection::default(),
            date_range: DateRangeMode::default(),
            interval: None,
        }
    }

    /// The window the chart covers: the explicit interval when set, otherwise
    /// the preset counted back from `now`.
    pub fn effective_window(&self, now: NaiveDateTime) -> DateInterval {
        resolve_window(self.date_range, self.interval, now)
    }
}

pub fn resolve_window(
    mode: DateRangeMode,
    interval: Option<DateInterval>,
    now: NaiveDateTime,
) -> DateInterval {
    match interval {
        Some(interval) => interval,
        None => DateInterval::new(now - Duration::days(mode.days_back()), now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(DateRangeMode::parse("Today"), Some(DateRangeMode::Today));
        assert_eq!(DateRangeMode::parse("Last 90 Days"), Some(DateRangeMode::Last90Days));
        assert_eq!(DateRangeMode::parse("Last Year"), None);
        assert_eq!(DateRangeMode::default(), DateRangeMode::Last7Days);
    }

    #[test]
    fn test_preset_windows() {
        let now = at(2024, 3, 10, 14);
        let mut filter = FilterState::new(HospitalSelection::All);

        filter.date_range = DateRangeMode::Today;
        assert_eq!(filter.effective_window(now), DateInterval::new(now, now));

        filter.date_range = DateRangeMode::Last30Days;
        assert_eq!(filter.effective_window(now).from, at(2024, 2, 9, 14));
        assert_eq!(filter.effective_window(now).to, now);
    }

    #[test]
    fn test_explicit_interval_wins() {
        let now = at(2024, 3, 10, 14);
        let interval = DateInterval::new(at(2024, 1, 1, 0), at(2024, 1, 5, 0));
        let mut filter = FilterState::new(HospitalSelection::All);
        filter.date_range = DateRangeMode::Last90Days;
        filter.interval = Some(interval);
        assert_eq!(filter.effective_window(now), interval);
    }
}
