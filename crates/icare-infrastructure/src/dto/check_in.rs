//! TaskCheckIn DTOs and migrations

use chrono::NaiveDate;
use icare_core::clock::Shift;
use icare_core::task::TaskCheckIn;
use serde::{Deserialize, Serialize};
use version_migrate::{IntoDomain, Versioned};

/// Task check-in V1.0.0.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct TaskCheckInV1_0_0 {
    pub task_id: String,
    pub date: NaiveDate,
    pub time: String,
    pub shift: Shift,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default = "default_completed")]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_uri: Option<String>,
}

fn default_completed() -> bool {
    true
}

impl IntoDomain<TaskCheckIn> for TaskCheckInV1_0_0 {
    fn into_domain(self) -> TaskCheckIn {
        TaskCheckIn {
            task_id: self.task_id,
            date: self.date,
            time: self.time,
            shift: self.shift,
            note: self.note,
            completed: self.completed,
            photo_uri: self.photo_uri,
        }
    }
}

impl From<&TaskCheckIn> for TaskCheckInV1_0_0 {
    fn from(check_in: &TaskCheckIn) -> Self {
        TaskCheckInV1_0_0 {
            task_id: check_in.task_id.clone(),
            date: check_in.date,
            time: check_in.time.clone(),
            shift: check_in.shift,
            note: check_in.note.clone(),
            completed: check_in.completed,
            photo_uri: check_in.photo_uri.clone(),
        }
    }
}

/// Creates and configures a Migrator instance for TaskCheckIn entities.
pub fn create_check_in_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let check_in_path = version_migrate::Migrator::define("check_in")
        .from::<TaskCheckInV1_0_0>()
        .into::<TaskCheckIn>();

    migrator
        .register(check_in_path)
        .expect("Failed to register check_in migration path");

    migrator
}
