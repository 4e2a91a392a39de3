//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schema of the record files. They are
//! private to the infrastructure layer and absorb the evolution of the
//! storage format. Every stored entry carries a `version` field.
//!
//! ### VitalSign Version History
//! - **1.0.0**: Reading with `is_abnormal` only
//! - **1.1.0**: Added `alert_level`
//!
//! ### CareConfig Version History
//! - **1.0.0**: Data directory and logging
//! - **1.1.0**: Added `event_transitions`

mod abnormal_event;
mod care_config;
mod check_in;
mod intake_output;
mod observation;
mod patient_profile;
mod shift_report;
mod vital_sign;

pub use abnormal_event::{AbnormalEventV1_0_0, create_abnormal_event_migrator};
pub use care_config::{CareConfigV1_0_0, CareConfigV1_1_0, create_care_config_migrator};
pub use check_in::{TaskCheckInV1_0_0, create_check_in_migrator};
pub use intake_output::{IntakeOutputV1_0_0, create_intake_output_migrator};
pub use observation::{ObservationV1_0_0, create_observation_migrator};
pub use patient_profile::{PatientProfileV1_0_0, create_patient_profile_migrator};
pub use shift_report::{ShiftReportV1_0_0, create_shift_report_migrator};
pub use vital_sign::{VitalSignDTO, VitalSignV1_0_0, VitalSignV1_1_0, create_vital_sign_migrator};

use icare_core::error::{CareError, Result};
use icare_core::event::AbnormalEvent;
use icare_core::intake_output::IntakeOutputRecord;
use icare_core::observation::ObservationRecord;
use icare_core::record::Record;
use icare_core::report::ShiftReport;
use icare_core::task::TaskCheckIn;
use icare_core::vitals::VitalSign;
use serde_json::Value;

/// A record type with a versioned on-disk representation.
pub trait StoredRecord: Record {
    /// Entity name registered with the migrator.
    const ENTITY: &'static str;

    /// Version written by `encode_all`. Entries above it are left untouched.
    const VERSION: &'static str;

    /// Migrates and converts one stored entry.
    fn decode(value: Value) -> Result<Self>;

    /// Converts records to their latest DTO form, version field included.
    fn encode_all(records: &[Self]) -> Result<Vec<Value>>;
}

macro_rules! stored_record {
    ($domain:ty, $dto:ty, $entity:literal, $version:literal, $migrator:ident) => {
        impl StoredRecord for $domain {
            const ENTITY: &'static str = $entity;
            const VERSION: &'static str = $version;

            fn decode(value: Value) -> Result<Self> {
                $migrator()
                    .load_flat_from(Self::ENTITY, value)
                    .map_err(|e| CareError::migration(format!("Failed to migrate {}: {}", $entity, e)))
            }

            fn encode_all(records: &[Self]) -> Result<Vec<Value>> {
                let dtos: Vec<$dto> = records.iter().map(<$dto>::from).collect();
                let json_str = $migrator().save_vec_flat(dtos).map_err(|e| {
                    CareError::migration(format!("Failed to serialize {}: {}", $entity, e))
                })?;
                Ok(serde_json::from_str(&json_str)?)
            }
        }
    };
}

stored_record!(
    TaskCheckIn,
    TaskCheckInV1_0_0,
    "check_in",
    "1.0.0",
    create_check_in_migrator
);
stored_record!(
    VitalSign,
    VitalSignDTO,
    "vital_sign",
    "1.1.0",
    create_vital_sign_migrator
);
stored_record!(
    IntakeOutputRecord,
    IntakeOutputV1_0_0,
    "intake_output",
    "1.0.0",
    create_intake_output_migrator
);
stored_record!(
    ObservationRecord,
    ObservationV1_0_0,
    "observation",
    "1.0.0",
    create_observation_migrator
);
stored_record!(
    AbnormalEvent,
    AbnormalEventV1_0_0,
    "abnormal_event",
    "1.0.0",
    create_abnormal_event_migrator
);
stored_record!(
    ShiftReport,
    ShiftReportV1_0_0,
    "shift_report",
    "1.0.0",
    create_shift_report_migrator
);
