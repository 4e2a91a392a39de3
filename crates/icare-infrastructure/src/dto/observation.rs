//! ObservationRecord DTOs and migrations

use chrono::NaiveDate;
use icare_core::observation::{ObservationCategory, ObservationRecord};
use serde::{Deserialize, Serialize};
use version_migrate::{IntoDomain, Versioned};

/// Observation note V1.0.0.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct ObservationV1_0_0 {
    pub id: String,
    pub date: NaiveDate,
    pub time: String,
    pub category: ObservationCategory,
    pub content: String,
    #[serde(default)]
    pub is_abnormal: bool,
}

impl IntoDomain<ObservationRecord> for ObservationV1_0_0 {
    fn into_domain(self) -> ObservationRecord {
        ObservationRecord {
            id: self.id,
            date: self.date,
            time: self.time,
            category: self.category,
            content: self.content,
            is_abnormal: self.is_abnormal,
        }
    }
}

impl From<&ObservationRecord> for ObservationV1_0_0 {
    fn from(record: &ObservationRecord) -> Self {
        ObservationV1_0_0 {
            id: record.id.clone(),
            date: record.date,
            time: record.time.clone(),
            category: record.category,
            content: record.content.clone(),
            is_abnormal: record.is_abnormal,
        }
    }
}

/// Creates and configures a Migrator instance for ObservationRecord entities.
pub fn create_observation_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let observation_path = version_migrate::Migrator::define("observation")
        .from::<ObservationV1_0_0>()
        .into::<ObservationRecord>();

    migrator
        .register(observation_path)
        .expect("Failed to register observation migration path");

    migrator
}
