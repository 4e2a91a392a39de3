//! ShiftReport DTOs and migrations

use super::abnormal_event::AbnormalEventV1_0_0;
use chrono::NaiveDate;
use icare_core::clock::Shift;
use icare_core::intake_output::FluidBalance;
use icare_core::report::{ShiftReport, VitalSummary};
use serde::{Deserialize, Serialize};
use version_migrate::{IntoDomain, Versioned};

/// Shift report V1.0.0.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct ShiftReportV1_0_0 {
    pub id: String,
    pub date: NaiveDate,
    pub shift: Shift,
    pub generated_at: String,
    pub completion_rate: f64,
    #[serde(default)]
    pub completed_tasks: Vec<String>,
    #[serde(default)]
    pub missed_tasks: Vec<String>,
    #[serde(default)]
    pub abnormal_events: Vec<AbnormalEventV1_0_0>,
    #[serde(default)]
    pub vitals_summary: Vec<VitalSummary>,
    #[serde(default)]
    pub intake_summary: FluidBalance,
    #[serde(default)]
    pub observations: Vec<String>,
    #[serde(default)]
    pub next_shift_focus: Vec<String>,
}

impl IntoDomain<ShiftReport> for ShiftReportV1_0_0 {
    fn into_domain(self) -> ShiftReport {
        ShiftReport {
            id: self.id,
            date: self.date,
            shift: self.shift,
            generated_at: self.generated_at,
            completion_rate: self.completion_rate,
            completed_tasks: self.completed_tasks,
            missed_tasks: self.missed_tasks,
            abnormal_events: self
                .abnormal_events
                .into_iter()
                .map(IntoDomain::into_domain)
                .collect(),
            vitals_summary: self.vitals_summary,
            intake_summary: self.intake_summary,
            observations: self.observations,
            next_shift_focus: self.next_shift_focus,
        }
    }
}

impl From<&ShiftReport> for ShiftReportV1_0_0 {
    fn from(report: &ShiftReport) -> Self {
        ShiftReportV1_0_0 {
            id: report.id.clone(),
            date: report.date,
            shift: report.shift,
            generated_at: report.generated_at.clone(),
            completion_rate: report.completion_rate,
            completed_tasks: report.completed_tasks.clone(),
            missed_tasks: report.missed_tasks.clone(),
            abnormal_events: report.abnormal_events.iter().map(Into::into).collect(),
            vitals_summary: report.vitals_summary.clone(),
            intake_summary: report.intake_summary,
            observations: report.observations.clone(),
            next_shift_focus: report.next_shift_focus.clone(),
        }
    }
}

/// Creates and configures a Migrator instance for ShiftReport entities.
pub fn create_shift_report_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let report_path = version_migrate::Migrator::define("shift_report")
        .from::<ShiftReportV1_0_0>()
        .into::<ShiftReport>();

    migrator
        .register(report_path)
        .expect("Failed to register shift_report migration path");

    migrator
}
