// Chart time-series domain model
use super::robot::RobotType;
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSeriesPoint {
    pub label: String,
    values: [u32; 3],
}

impl TimeSeriesPoint {
    /// Build a point from one value per robot type, computed in `RobotType::ALL` order.
    pub fn from_fn(label: String, mut value: impl FnMut(RobotType) -> u32) -> Self {
        let values = RobotType::ALL.map(&mut value);
        Self { label, values }
    }

    pub fn value(&self, robot_type: RobotType) -> u32 {
        self.values[Self::index(robot_type)]
    }

    pub fn values(&self) -> impl Iterator<Item = (RobotType, u32)> + '_ {
        RobotType::ALL.into_iter().zip(self.values.iter().copied())
    }

    fn index(robot_type: RobotType) -> usize {
        match robot_type {
            RobotType::NurseBots => 0,
            RobotType::CoBots => 1,
            RobotType::AutonomousBeds => 2,
        }
    }
}

// Flat `{"date": .., "Nurse Bots": .., ...}` rows, keyed the way the chart reads them.
impl Serialize for TimeSeriesPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.values.len()))?;
        map.serialize_entry("date", &self.label)?;
        for (robot_type, value) in self.values() {
            map.serialize_entry(robot_type.name(), &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_orders_by_type() {
        let point = TimeSeriesPoint::from_fn("09:00".to_string(), |t| match t {
            RobotType::NurseBots => 1,
            RobotType::CoBots => 2,
            RobotType::AutonomousBeds => 3,
        });
        assert_eq!(point.value(RobotType::CoBots), 2);
        assert_eq!(point.value(RobotType::AutonomousBeds), 3);
    }

    #[test]
    fn test_serializes_flat_row() {
        let point = TimeSeriesPoint::from_fn("Mar 04".to_string(), |_| 7);
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "date": "Mar 04",
                "Nurse Bots": 7,
                "Co-Bots": 7,
                "Autonomous Beds": 7,
            })
        );
    }
}
