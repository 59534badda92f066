// Time-series generator - Synthetic chart rows per robot type
use crate::application::noise_source::NoiseSource;
use crate::domain::filter::{resolve_window, DateInterval, DateRangeMode};
use crate::domain::hospital::HospitalSelection;
use crate::domain::metric::ERROR_RATE;
use crate::domain::robot::RobotType;
use crate::domain::time_series::TimeSeriesPoint;
use chrono::NaiveTime;

const HOURS_PER_DAY: u32 = 24;
const OSCILLATION_AMPLITUDE: f64 = 0.2;
const HOURLY_FREQUENCY: f64 = 0.3;
const DAILY_FREQUENCY: f64 = 0.1;
const DAY_LABEL_FORMAT: &str = "%b %d";

/// Per-series inputs that drive the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesRequest<'a> {
    pub metric_id: Option<&'a str>,
    pub hospital: &'a HospitalSelection,
    pub date_range: DateRangeMode,
    pub interval: Option<DateInterval>,
}

/// Generate the chart rows for the current filters.
///
/// `Today` yields 24 hourly rows; every other mode yields one row per calendar
/// day of the effective window, both ends included.
pub fn generate_series(
    request: &SeriesRequest<'_>,
    now: chrono::NaiveDateTime,
    noise: &dyn NoiseSource,
) -> Vec<TimeSeriesPoint> {
    let seed = metric_seed(request.metric_id);
    let scale = request.hospital.scale_factor();
    let error_rate = request.metric_id == Some(ERROR_RATE);

    if request.date_range == DateRangeMode::Today {
        return hourly_points(seed, scale, error_rate);
    }

    let window = resolve_window(request.date_range, request.interval, now);
    daily_points(window, seed, scale, error_rate, noise)
}

fn hourly_points(seed: f64, scale: f64, error_rate: bool) -> Vec<TimeSeriesPoint> {
    (0..HOURS_PER_DAY)
        .map(|hour| {
            let time_of_day = time_of_day_factor(hour);
            let variation = oscillation(hour as f64, HOURLY_FREQUENCY, seed);
            TimeSeriesPoint::from_fn(format!("{:02}:00", hour), |robot_type| {
                to_count(base_value(robot_type, error_rate) * time_of_day * (1.0 + variation) * scale)
            })
        })
        .collect()
}

fn daily_points(
    window: DateInterval,
    seed: f64,
    scale: f64,
    error_rate: bool,
    noise: &dyn NoiseSource,
) -> Vec<TimeSeriesPoint> {
    let start = window.from.date();
    let end = window.to.date();
    if start > end {
        tracing::warn!("Date window starts after it ends ({} > {}), no rows", start, end);
        return Vec::new();
    }

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| {
            // whole days elapsed since the window start, truncated toward zero
            let offset = (day.and_time(NaiveTime::MIN) - window.from).num_days();
            let trend = oscillation(offset as f64, DAILY_FREQUENCY, seed);
            TimeSeriesPoint::from_fn(day.format(DAY_LABEL_FORMAT).to_string(), |robot_type| {
                let jitter = noise.fraction() * noise_amplitude(robot_type);
                to_count((base_value(robot_type, error_rate) * (1.0 + trend) + jitter) * scale)
            })
        })
        .collect()
}

/// Phase offset of the oscillation: the metric id length, or 1 when there is none.
fn metric_seed(metric_id: Option<&str>) -> f64 {
    match metric_id.map(str::len) {
        Some(len) if len > 0 => len as f64,
        _ => 1.0,
    }
}

fn oscillation(step: f64, frequency: f64, seed: f64) -> f64 {
    (step * frequency + seed).sin() * OSCILLATION_AMPLITUDE
}

fn time_of_day_factor(hour: u32) -> f64 {
    match hour {
        9..=17 => 1.2,
        6..=20 => 1.0,
        _ => 0.6,
    }
}

fn base_value(robot_type: RobotType, error_rate: bool) -> f64 {
    match (robot_type, error_rate) {
        (RobotType::NurseBots, true) => 20.0,
        (RobotType::CoBots, true) => 15.0,
        (RobotType::AutonomousBeds, true) => 18.0,
        (RobotType::NurseBots, false) => 60.0,
        (RobotType::CoBots, false) => 45.0,
        (RobotType::AutonomousBeds, false) => 50.0,
    }
}

fn noise_amplitude(robot_type: RobotType) -> f64 {
    match robot_type {
        RobotType::NurseBots => 10.0,
        RobotType::CoBots => 8.0,
        RobotType::AutonomousBeds => 9.0,
    }
}

fn to_count(value: f64) -> u32 {
    value.floor().max(0.0) as u32
}
