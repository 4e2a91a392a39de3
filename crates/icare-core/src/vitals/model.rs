//! Vital sign domain model.

use super::classifier::classify;
use crate::record::{Collection, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of vital sign measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalType {
    Temperature,
    BloodPressureSys,
    BloodPressureDia,
    HeartRate,
    Spo2,
}

impl VitalType {
    pub const ALL: [VitalType; 5] = [
        VitalType::Temperature,
        VitalType::BloodPressureSys,
        VitalType::BloodPressureDia,
        VitalType::HeartRate,
        VitalType::Spo2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VitalType::Temperature => "temperature",
            VitalType::BloodPressureSys => "blood_pressure_sys",
            VitalType::BloodPressureDia => "blood_pressure_dia",
            VitalType::HeartRate => "heart_rate",
            VitalType::Spo2 => "spo2",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Display metadata for this vital type.
    pub fn range(self) -> VitalRange {
        match self {
            VitalType::Temperature => VitalRange {
                label: "体温",
                unit: "℃",
                normal_min: 36.0,
                normal_max: 37.5,
            },
            VitalType::BloodPressureSys => VitalRange {
                label: "收缩压(上压)",
                unit: "mmHg",
                normal_min: 90.0,
                normal_max: 140.0,
            },
            VitalType::BloodPressureDia => VitalRange {
                label: "舒张压(下压)",
                unit: "mmHg",
                normal_min: 60.0,
                normal_max: 90.0,
            },
            VitalType::HeartRate => VitalRange {
                label: "心率",
                unit: "次/分",
                normal_min: 60.0,
                normal_max: 100.0,
            },
            VitalType::Spo2 => VitalRange {
                label: "血氧饱和度",
                unit: "%",
                normal_min: 95.0,
                normal_max: 100.0,
            },
        }
    }
}

impl fmt::Display for VitalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label, unit and reference interval shown next to a reading.
///
/// The reference interval is informational only; alerting is decided by
/// [`classify`](super::classify).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalRange {
    pub label: &'static str,
    pub unit: &'static str,
    pub normal_min: f64,
    pub normal_max: f64,
}

/// Severity of a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    #[default]
    None,
    Orange,
    Red,
}

impl AlertLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertLevel::None => "none",
            AlertLevel::Orange => "orange",
            AlertLevel::Red => "red",
        }
    }

    pub fn is_alert(self) -> bool {
        self != AlertLevel::None
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single vital sign reading. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSign {
    pub id: String,
    pub date: NaiveDate,
    /// Wall-clock time, `HH:MM`.
    pub time: String,
    pub vital_type: VitalType,
    pub value: f64,
    pub is_abnormal: bool,
    pub alert_level: AlertLevel,
}

impl VitalSign {
    /// Builds a reading with a fresh id, classifying `value` on the way in.
    pub fn new(date: NaiveDate, time: impl Into<String>, vital_type: VitalType, value: f64) -> Self {
        let alert_level = classify(vital_type, value);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            time: time.into(),
            vital_type,
            value,
            is_abnormal: alert_level.is_alert(),
            alert_level,
        }
    }

    /// Short human description, e.g. `体温 38.2℃ 异常`.
    pub fn abnormal_description(&self) -> String {
        let range = self.vital_type.range();
        format!("{} {}{} 异常", range.label, self.value, range.unit)
    }
}

impl Record for VitalSign {
    const COLLECTION: Collection = Collection::Vitals;

    fn date(&self) -> NaiveDate {
        self.date
    }
}
