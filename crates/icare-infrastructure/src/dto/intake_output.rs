//! IntakeOutputRecord DTOs and migrations

use chrono::NaiveDate;
use icare_core::intake_output::{IntakeOutputRecord, IntakeOutputType};
use serde::{Deserialize, Serialize};
use version_migrate::{IntoDomain, Versioned};

/// Intake/output entry V1.0.0.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct IntakeOutputV1_0_0 {
    pub id: String,
    pub date: NaiveDate,
    pub time: String,
    #[serde(rename = "type")]
    pub io_type: IntakeOutputType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stool_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl IntoDomain<IntakeOutputRecord> for IntakeOutputV1_0_0 {
    fn into_domain(self) -> IntakeOutputRecord {
        IntakeOutputRecord {
            id: self.id,
            date: self.date,
            time: self.time,
            io_type: self.io_type,
            amount: self.amount,
            stool_type: self.stool_type,
            note: self.note,
        }
    }
}

impl From<&IntakeOutputRecord> for IntakeOutputV1_0_0 {
    fn from(record: &IntakeOutputRecord) -> Self {
        IntakeOutputV1_0_0 {
            id: record.id.clone(),
            date: record.date,
            time: record.time.clone(),
            io_type: record.io_type,
            amount: record.amount,
            stool_type: record.stool_type.clone(),
            note: record.note.clone(),
        }
    }
}

/// Creates and configures a Migrator instance for IntakeOutputRecord entities.
pub fn create_intake_output_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let intake_output_path = version_migrate::Migrator::define("intake_output")
        .from::<IntakeOutputV1_0_0>()
        .into::<IntakeOutputRecord>();

    migrator
        .register(intake_output_path)
        .expect("Failed to register intake_output migration path");

    migrator
}
