// Calibration service - Process-local calibration state
use crate::domain::calibration::{CalibrationKey, CalibrationMap, default_calibration};
use std::sync::{Arc, RwLock};

/// Owns the mutable calibration mapping for the lifetime of the process.
/// Injected into request handlers; nothing is persisted, so the mapping
/// resets to its defaults on restart.
#[derive(Clone)]
pub struct CalibrationService {
    values: Arc<RwLock<CalibrationMap>>,
}

impl CalibrationService {
    pub fn new() -> Self {
        Self {
            values: Arc::new(RwLock::new(default_calibration())),
        }
    }

    pub fn snapshot(&self) -> CalibrationMap {
        self.values.read().expect("calibration lock poisoned").clone()
    }

    /// Upsert one adjustment and return the updated mapping.
    pub fn set(&self, key: CalibrationKey, value: f64) -> CalibrationMap {
        let mut values = self.values.write().expect("calibration lock poisoned");
        values.insert(key, value);
        values.clone()
    }
}

impl Default for CalibrationService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_defaults() {
        let service = CalibrationService::new();
        let map = service.snapshot();
        assert_eq!(map[&CalibrationKey::Ph], 0.0);
        assert_eq!(map[&CalibrationKey::PFactor], 1.0);
    }

    #[test]
    fn test_set_keeps_other_keys_unchanged() {
        let service = CalibrationService::new();
        service.set(CalibrationKey::Temperature, -1.5);
        let map = service.set(CalibrationKey::Ph, 0.3);

        assert_eq!(map[&CalibrationKey::Ph], 0.3);
        assert_eq!(map[&CalibrationKey::Temperature], -1.5);
        assert_eq!(map[&CalibrationKey::NFactor], 1.0);
        assert_eq!(map.len(), CalibrationKey::ALL.len());
    }

    #[test]
    fn test_snapshot_reflects_latest_write() {
        let service = CalibrationService::new();
        service.set(CalibrationKey::Ec, 0.05);
        assert_eq!(service.snapshot()[&CalibrationKey::Ec], 0.05);
    }
}
