// Robot summary generator - Active/total counts per robot type
use crate::application::noise_source::NoiseSource;
use crate::domain::hospital::HospitalSelection;
use crate::domain::metric::reduces_active_count;
use crate::domain::robot::{RobotType, RobotTypeSummary};

/// Baseline fleet counts.
struct FleetBaseline {
    robot_type: RobotType,
    all_active: u32,
    all_total: u32,
    site_active: u32,
    site_total: u32,
}

const BASELINES: [FleetBaseline; 3] = [
    FleetBaseline {
        robot_type: RobotType::NurseBots,
        all_active: 185,
        all_total: 195,
        site_active: 90,
        site_total: 95,
    },
    FleetBaseline {
        robot_type: RobotType::CoBots,
        all_active: 28,
        all_total: 30,
        site_active: 15,
        site_total: 15,
    },
    FleetBaseline {
        robot_type: RobotType::AutonomousBeds,
        all_active: 48,
        all_total: 50,
        site_active: 24,
        site_total: 25,
    },
];

const ALL_HOSPITALS_MAX_REDUCTION: u32 = 20;
const SINGLE_HOSPITAL_MAX_REDUCTION: u32 = 10;

/// Derive the stat cards for a metric.
///
/// Downtime and error-rate pages knock a random amount off every active
/// count: `[0, 20)` across all hospitals, `[0, 10)` for a single site.
/// Totals never change.
pub fn robot_summaries(
    metric_id: Option<&str>,
    hospital: &HospitalSelection,
    noise: &dyn NoiseSource,
) -> Vec<RobotTypeSummary> {
    let all = hospital.is_all();
    let reduce = metric_id.is_some_and(reduces_active_count);
    let max_reduction = if all {
        ALL_HOSPITALS_MAX_REDUCTION
    } else {
        SINGLE_HOSPITAL_MAX_REDUCTION
    };

    BASELINES
        .iter()
        .map(|baseline| {
            let (active, total) = if all {
                (baseline.all_active, baseline.all_total)
            } else {
                (baseline.site_active, baseline.site_total)
            };
            let active = if reduce {
                active.saturating_sub(noise.below(max_reduction))
            } else {
                active
            };
            RobotTypeSummary::new(baseline.robot_type, active, total)
        })
        .collect()
}
