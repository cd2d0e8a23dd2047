// Calibration domain model
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The closed set of calibration adjustments. Raw sensors carry a single
/// offset; the NPK channels carry a factor and an offset each. Unknown keys
/// are rejected at deserialization rather than accepted silently.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationKey {
    Temperature,
    Humidity,
    Ec,
    Ph,
    NFactor,
    PFactor,
    KFactor,
    NOffset,
    POffset,
    KOffset,
}

impl CalibrationKey {
    pub const ALL: [CalibrationKey; 10] = [
        CalibrationKey::Temperature,
        CalibrationKey::Humidity,
        CalibrationKey::Ec,
        CalibrationKey::Ph,
        CalibrationKey::NFactor,
        CalibrationKey::PFactor,
        CalibrationKey::KFactor,
        CalibrationKey::NOffset,
        CalibrationKey::POffset,
        CalibrationKey::KOffset,
    ];

    /// Factors default to 1, offsets to 0.
    pub fn default_value(self) -> f64 {
        match self {
            CalibrationKey::NFactor | CalibrationKey::PFactor | CalibrationKey::KFactor => 1.0,
            _ => 0.0,
        }
    }
}

pub type CalibrationMap = BTreeMap<CalibrationKey, f64>;

pub fn default_calibration() -> CalibrationMap {
    CalibrationKey::ALL
        .into_iter()
        .map(|key| (key, key.default_value()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_key() {
        let map = default_calibration();
        assert_eq!(map.len(), CalibrationKey::ALL.len());
        assert_eq!(map[&CalibrationKey::Temperature], 0.0);
        assert_eq!(map[&CalibrationKey::NFactor], 1.0);
        assert_eq!(map[&CalibrationKey::KOffset], 0.0);
    }

    #[test]
    fn test_keys_serialize_snake_case() {
        let json = serde_json::to_string(&default_calibration()).unwrap();
        assert!(json.contains("\"n_factor\":1.0"));
        assert!(json.contains("\"temperature\":0.0"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let parsed: Result<CalibrationKey, _> = serde_json::from_str("\"voltage\"");
        assert!(parsed.is_err());
    }
}
