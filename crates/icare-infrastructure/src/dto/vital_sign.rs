//! VitalSign DTOs and migrations
//!
//! ### Version History
//! - **1.0.0**: Reading with an `is_abnormal` flag only
//! - **1.1.0**: Added `alert_level`, recomputed from the reading on migration

use chrono::NaiveDate;
use icare_core::vitals::{AlertLevel, VitalSign, VitalType, classify};
use serde::{Deserialize, Serialize};
use version_migrate::{IntoDomain, MigratesTo, Versioned};

/// Vital sign V1.0.0 (no alert level).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct VitalSignV1_0_0 {
    pub id: String,
    pub date: NaiveDate,
    pub time: String,
    pub vital_type: VitalType,
    pub value: f64,
    #[serde(default)]
    pub is_abnormal: bool,
}

/// Vital sign V1.1.0 (added alert_level).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
pub struct VitalSignV1_1_0 {
    pub id: String,
    pub date: NaiveDate,
    pub time: String,
    pub vital_type: VitalType,
    pub value: f64,
    pub is_abnormal: bool,
    pub alert_level: AlertLevel,
}

/// Type alias for the latest VitalSign version.
pub type VitalSignDTO = VitalSignV1_1_0;

impl MigratesTo<VitalSignV1_1_0> for VitalSignV1_0_0 {
    fn migrate(self) -> VitalSignV1_1_0 {
        let alert_level = classify(self.vital_type, self.value);
        VitalSignV1_1_0 {
            id: self.id,
            date: self.date,
            time: self.time,
            vital_type: self.vital_type,
            value: self.value,
            is_abnormal: alert_level.is_alert(),
            alert_level,
        }
    }
}

impl IntoDomain<VitalSign> for VitalSignV1_1_0 {
    fn into_domain(self) -> VitalSign {
        VitalSign {
            id: self.id,
            date: self.date,
            time: self.time,
            vital_type: self.vital_type,
            value: self.value,
            is_abnormal: self.is_abnormal,
            alert_level: self.alert_level,
        }
    }
}

impl From<&VitalSign> for VitalSignV1_1_0 {
    fn from(vital: &VitalSign) -> Self {
        VitalSignV1_1_0 {
            id: vital.id.clone(),
            date: vital.date,
            time: vital.time.clone(),
            vital_type: vital.vital_type,
            value: vital.value,
            is_abnormal: vital.is_abnormal,
            alert_level: vital.alert_level,
        }
    }
}

/// Creates and configures a Migrator instance for VitalSign entities.
///
/// # Migration Path
///
/// - V1.0.0 → V1.1.0: Classifies the stored value to fill `alert_level`
/// - V1.1.0 → VitalSign: Converts DTO to domain model
pub fn create_vital_sign_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let vital_path = version_migrate::Migrator::define("vital_sign")
        .from::<VitalSignV1_0_0>()
        .step::<VitalSignV1_1_0>()
        .into::<VitalSign>();

    migrator
        .register(vital_path)
        .expect("Failed to register vital_sign migration path");

    migrator
}
