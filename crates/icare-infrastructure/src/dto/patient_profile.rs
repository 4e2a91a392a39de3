//! PatientProfile DTOs and migrations

use chrono::NaiveDate;
use icare_core::patient::{EmergencyContact, PatientProfile};
use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

/// Emergency contact as stored inside the profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyContactV1_0_0 {
    pub role: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

/// Patient profile V1.0.0.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct PatientProfileV1_0_0 {
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub bed_number: String,
    pub care_level: String,
    #[serde(default)]
    pub key_alerts: Vec<String>,
    pub admission_date: NaiveDate,
    #[serde(default)]
    pub contacts: Vec<EmergencyContactV1_0_0>,
}

impl IntoDomain<PatientProfile> for PatientProfileV1_0_0 {
    fn into_domain(self) -> PatientProfile {
        PatientProfile {
            name: self.name,
            age: self.age,
            bed_number: self.bed_number,
            care_level: self.care_level,
            key_alerts: self.key_alerts,
            admission_date: self.admission_date,
            contacts: self
                .contacts
                .into_iter()
                .map(|c| EmergencyContact::new(c.role, c.name, c.phone))
                .collect(),
        }
    }
}

impl FromDomain<PatientProfile> for PatientProfileV1_0_0 {
    fn from_domain(profile: PatientProfile) -> Self {
        PatientProfileV1_0_0 {
            name: profile.name,
            age: profile.age,
            bed_number: profile.bed_number,
            care_level: profile.care_level,
            key_alerts: profile.key_alerts,
            admission_date: profile.admission_date,
            contacts: profile
                .contacts
                .into_iter()
                .map(|c| EmergencyContactV1_0_0 {
                    role: c.role,
                    name: c.name,
                    phone: c.phone,
                })
                .collect(),
        }
    }
}

/// Creates and configures a Migrator instance for the patient profile.
///
/// # Example
///
/// ```ignore
/// let migrator = create_patient_profile_migrator();
/// let profile: PatientProfile = migrator.load_flat_from("patient_profile", toml_value)?;
/// ```
pub fn create_patient_profile_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let profile_path = version_migrate::Migrator::define("patient_profile")
        .from::<PatientProfileV1_0_0>()
        .into_with_save::<PatientProfile>();

    migrator
        .register(profile_path)
        .expect("Failed to register patient_profile migration path");

    migrator
}
