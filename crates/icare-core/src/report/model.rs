//! Shift report snapshot.

use crate::clock::Shift;
use crate::event::AbnormalEvent;
use crate::intake_output::FluidBalance;
use crate::record::{Collection, Record};
use crate::vitals::VitalType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Latest reading of one vital type within the reported day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSummary {
    pub vital_type: VitalType,
    pub latest: f64,
    pub is_abnormal: bool,
}

/// Point-in-time summary of a shift, keyed by `(date, shift)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftReport {
    pub id: String,
    pub date: NaiveDate,
    pub shift: Shift,
    pub generated_at: String,
    pub completion_rate: f64,
    pub completed_tasks: Vec<String>,
    pub missed_tasks: Vec<String>,
    pub abnormal_events: Vec<AbnormalEvent>,
    pub vitals_summary: Vec<VitalSummary>,
    pub intake_summary: FluidBalance,
    pub observations: Vec<String>,
    pub next_shift_focus: Vec<String>,
}

impl ShiftReport {
    /// Completion rate as a whole percentage.
    pub fn completion_percent(&self) -> i64 {
        (self.completion_rate * 100.0).round() as i64
    }

    /// Number of included events not yet resolved.
    pub fn unresolved_count(&self) -> usize {
        self.abnormal_events
            .iter()
            .filter(|e| !e.status.is_resolved())
            .count()
    }
}

impl Record for ShiftReport {
    const COLLECTION: Collection = Collection::ShiftReports;

    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Report identifier for a `(date, shift)` pair.
pub fn report_id(date: NaiveDate, shift: Shift) -> String {
    format!("report_{}_{}", date, shift.as_str())
}
