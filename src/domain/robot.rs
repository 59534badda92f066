// Robot fleet domain models
use serde::{Serialize, Serializer};
use std::fmt;

/// Sentinel label for "every robot type" in the filter.
pub const ROBOT_TYPE_ALL: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RobotType {
    NurseBots,
    CoBots,
    AutonomousBeds,
}

impl RobotType {
    pub const ALL: [RobotType; 3] = [
        RobotType::NurseBots,
        RobotType::CoBots,
        RobotType::AutonomousBeds,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RobotType::NurseBots => "Nurse Bots",
            RobotType::CoBots => "Co-Bots",
            RobotType::AutonomousBeds => "Autonomous Beds",
        }
    }

    /// Line colour used by the chart for this series
    pub fn color(&self) -> &'static str {
        match self {
            RobotType::NurseBots => "#4CAF50",
            RobotType::CoBots => "#2196F3",
            RobotType::AutonomousBeds => "#FFC107",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for RobotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for RobotType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// One entry of the robot type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotTypeFilter {
    All,
    Only(RobotType),
}

impl RobotTypeFilter {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw == ROBOT_TYPE_ALL {
            Some(Self::All)
        } else {
            RobotType::from_name(raw).map(Self::Only)
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::All => ROBOT_TYPE_ALL,
            Self::Only(robot_type) => robot_type.name(),
        }
    }
}

impl Serialize for RobotTypeFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Ordered set of selected robot types.
///
/// Never empty: either exactly `[All]` or one or more specific types in the
/// order they were picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RobotTypeSelection(Vec<RobotTypeFilter>);

impl Default for RobotTypeSelection {
    fn default() -> Self {
        Self(vec![RobotTypeFilter::All])
    }
}

impl RobotTypeSelection {
    pub fn entries(&self) -> &[RobotTypeFilter] {
        &self.0
    }

    pub fn is_all(&self) -> bool {
        self.0 == [RobotTypeFilter::All]
    }

    /// Apply a pick from the filter widget.
    pub fn toggle(&mut self, filter: RobotTypeFilter) {
        match filter {
            RobotTypeFilter::All => self.0 = vec![RobotTypeFilter::All],
            specific if self.0.contains(&specific) => self.0.retain(|f| *f != specific),
            specific => {
                self.0.retain(|f| *f != RobotTypeFilter::All);
                self.0.push(specific);
            }
        }
        self.fall_back_to_all();
    }

    /// Drop a single chip from the selection.
    pub fn remove(&mut self, filter: RobotTypeFilter) {
        self.0.retain(|f| *f != filter);
        self.fall_back_to_all();
    }

    fn fall_back_to_all(&mut self) {
        if self.0.is_empty() {
            self.0.push(RobotTypeFilter::All);
        }
    }
}

/// Active vs total robots of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RobotTypeSummary {
    #[serde(rename = "type")]
    pub robot_type: RobotType,
    pub active: u32,
    pub total: u32,
}

impl RobotTypeSummary {
    pub fn new(robot_type: RobotType, active: u32, total: u32) -> Self {
        Self {
            robot_type,
            active,
            total,
        }
    }
}
