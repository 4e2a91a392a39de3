//! Threshold classification of vital sign readings.

use super::model::{AlertLevel, VitalType};

/// Classifies a reading against the fixed bedside threshold table.
///
/// | type | red | orange |
/// |---|---|---|
/// | temperature (℃) | `> 38.0` or `< 36.0` | `> 37.5` |
/// | systolic (mmHg) | `< 90` or `> 160` | `> 140` |
/// | diastolic | never | never |
/// | heart rate (bpm) | `< 50` or `> 100` | never |
/// | SpO2 (%) | `< 90` | `< 95` |
pub fn classify(vital_type: VitalType, value: f64) -> AlertLevel {
    match vital_type {
        VitalType::Temperature => {
            if value > 38.0 || value < 36.0 {
                AlertLevel::Red
            } else if value > 37.5 {
                AlertLevel::Orange
            } else {
                AlertLevel::None
            }
        }
        VitalType::BloodPressureSys => {
            if value < 90.0 || value > 160.0 {
                AlertLevel::Red
            } else if value > 140.0 {
                AlertLevel::Orange
            } else {
                AlertLevel::None
            }
        }
        VitalType::BloodPressureDia => AlertLevel::None,
        VitalType::HeartRate => {
            if value < 50.0 || value > 100.0 {
                AlertLevel::Red
            } else {
                AlertLevel::None
            }
        }
        VitalType::Spo2 => {
            if value < 90.0 {
                AlertLevel::Red
            } else if value < 95.0 {
                AlertLevel::Orange
            } else {
                AlertLevel::None
            }
        }
    }
}

/// Classifies a reading whose type arrives as free text.
///
/// Unknown type names never alert.
pub fn classify_named(vital_type: &str, value: f64) -> AlertLevel {
    VitalType::parse(vital_type)
        .map(|t| classify(t, value))
        .unwrap_or(AlertLevel::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_tiers() {
        assert_eq!(classify(VitalType::Temperature, 38.2), AlertLevel::Red);
        assert_eq!(classify(VitalType::Temperature, 37.8), AlertLevel::Orange);
        assert_eq!(classify(VitalType::Temperature, 37.0), AlertLevel::None);
        assert_eq!(classify(VitalType::Temperature, 35.9), AlertLevel::Red);
    }

    #[test]
    fn test_temperature_boundaries() {
        assert_eq!(classify(VitalType::Temperature, 36.0), AlertLevel::None);
        assert_eq!(classify(VitalType::Temperature, 37.5), AlertLevel::None);
        assert_eq!(classify(VitalType::Temperature, 38.0), AlertLevel::Orange);
    }

    #[test]
    fn test_temperature_sweep_matches_table() {
        // 34.0 .. 40.0 in 0.1 steps
        for step in 0..=60 {
            let v = 34.0 + f64::from(step) * 0.1;
            let expected = if v > 38.0 || v < 36.0 {
                AlertLevel::Red
            } else if v > 37.5 {
                AlertLevel::Orange
            } else {
                AlertLevel::None
            };
            assert_eq!(classify(VitalType::Temperature, v), expected, "value {v}");
        }
    }

    #[test]
    fn test_systolic_tiers() {
        assert_eq!(classify(VitalType::BloodPressureSys, 85.0), AlertLevel::Red);
        assert_eq!(classify(VitalType::BloodPressureSys, 90.0), AlertLevel::None);
        assert_eq!(classify(VitalType::BloodPressureSys, 140.0), AlertLevel::None);
        assert_eq!(classify(VitalType::BloodPressureSys, 150.0), AlertLevel::Orange);
        assert_eq!(classify(VitalType::BloodPressureSys, 160.0), AlertLevel::Orange);
        assert_eq!(classify(VitalType::BloodPressureSys, 161.0), AlertLevel::Red);
    }

    #[test]
    fn test_diastolic_never_alerts() {
        for v in [20.0, 60.0, 90.0, 140.0] {
            assert_eq!(classify(VitalType::BloodPressureDia, v), AlertLevel::None);
        }
    }

    #[test]
    fn test_heart_rate_has_no_orange_tier() {
        assert_eq!(classify(VitalType::HeartRate, 105.0), AlertLevel::Red);
        assert_eq!(classify(VitalType::HeartRate, 95.0), AlertLevel::None);
        assert_eq!(classify(VitalType::HeartRate, 45.0), AlertLevel::Red);
        for bpm in 0..200 {
            assert_ne!(
                classify(VitalType::HeartRate, f64::from(bpm)),
                AlertLevel::Orange
            );
        }
    }

    #[test]
    fn test_spo2_tiers() {
        assert_eq!(classify(VitalType::Spo2, 88.0), AlertLevel::Red);
        assert_eq!(classify(VitalType::Spo2, 90.0), AlertLevel::Orange);
        assert_eq!(classify(VitalType::Spo2, 92.0), AlertLevel::Orange);
        assert_eq!(classify(VitalType::Spo2, 95.0), AlertLevel::None);
        assert_eq!(classify(VitalType::Spo2, 97.0), AlertLevel::None);
    }

    #[test]
    fn test_unknown_type_name() {
        assert_eq!(classify_named("respiration_rate", 40.0), AlertLevel::None);
        assert_eq!(classify_named("spo2", 88.0), AlertLevel::Red);
    }
}
