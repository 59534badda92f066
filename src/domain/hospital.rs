// Hospital selection domain model
use serde::{Serialize, Serializer};
use std::fmt;

/// Sentinel meaning "aggregate across every hospital".
pub const HOSPITAL_ALL: &str = "All";

const ALL_HOSPITALS_SCALE: f64 = 2.1;
const SINGLE_HOSPITAL_SCALE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HospitalSelection {
    All,
    Site(String),
}

impl HospitalSelection {
    /// Resolve a raw name against the known hospitals.
    ///
    /// Returns `None` for names that are neither the sentinel nor a known site.
    pub fn resolve(name: &str, known: &[String]) -> Option<Self> {
        if name == HOSPITAL_ALL {
            return Some(Self::All);
        }
        known
            .iter()
            .find(|h| h.as_str() == name)
            .map(|h| Self::Site(h.clone()))
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn name(&self) -> &str {
        match self {
            Self::All => HOSPITAL_ALL,
            Self::Site(name) => name,
        }
    }

    /// Multiplier applied to every generated chart value.
    pub fn scale_factor(&self) -> f64 {
        if self.is_all() {
            ALL_HOSPITALS_SCALE
        } else {
            SINGLE_HOSPITAL_SCALE
        }
    }
}

impl fmt::Display for HospitalSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for HospitalSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> Vec<String> {
        vec!["Mayo Clinic Rochester".to_string(), "Mayo Clinic Phoenix".to_string()]
    }

    #[test]
    fn test_resolve_known_site() {
        let selection = HospitalSelection::resolve("Mayo Clinic Phoenix", &known());
        assert_eq!(
            selection,
            Some(HospitalSelection::Site("Mayo Clinic Phoenix".to_string()))
        );
    }

    #[test]
    fn test_resolve_sentinel_and_unknown() {
        assert_eq!(HospitalSelection::resolve("All", &known()), Some(HospitalSelection::All));
        assert_eq!(HospitalSelection::resolve("St. Nowhere", &known()), None);
        assert_eq!(HospitalSelection::resolve("", &known()), None);
    }

    #[test]
    fn test_scale_factor() {
        assert_eq!(HospitalSelection::All.scale_factor(), 2.1);
        assert_eq!(HospitalSelection::Site("x".to_string()).scale_factor(), 1.0);
    }
}
