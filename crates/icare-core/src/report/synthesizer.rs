//! Builds shift reports from a day's care activity.

use super::model::{ShiftReport, VitalSummary, report_id};
use crate::clock::Shift;
use crate::event::AbnormalEvent;
use crate::intake_output::{FluidBalance, IntakeOutputRecord};
use crate::observation::ObservationRecord;
use crate::task::{CheckInTracker, TaskCheckIn, TaskRegistry};
use crate::vitals::VitalSign;
use chrono::NaiveDate;

/// Net balance above which the next shift is told to watch fluid surplus.
pub const FLUID_SURPLUS_THRESHOLD: f64 = 500.0;
/// Net balance below which the next shift is told to replenish fluids.
pub const FLUID_DEFICIT_THRESHOLD: f64 = -300.0;

const MISSED_TASKS_IN_FOCUS: usize = 3;

/// Everything recorded that a report may draw from.
///
/// Records outside the reported date are ignored, so callers may pass
/// wider slices.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftActivity<'a> {
    pub check_ins: &'a [TaskCheckIn],
    pub vitals: &'a [VitalSign],
    pub intake_output: &'a [IntakeOutputRecord],
    pub observations: &'a [ObservationRecord],
    pub abnormal_events: &'a [AbnormalEvent],
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftReportSynthesizer {
    tracker: CheckInTracker,
}

impl ShiftReportSynthesizer {
    pub fn new(registry: TaskRegistry) -> Self {
        Self {
            tracker: CheckInTracker::new(registry),
        }
    }

    pub fn generate(
        &self,
        date: NaiveDate,
        shift: Shift,
        generated_at: impl Into<String>,
        activity: ShiftActivity<'_>,
    ) -> ShiftReport {
        let registry = self.tracker.registry();
        let completed_ids = self.tracker.completed_ids(activity.check_ins, date);

        let (completed, missed): (Vec<_>, Vec<_>) = registry
            .tasks()
            .iter()
            .partition(|task| completed_ids.contains(task.id));
        let completed_tasks: Vec<String> = completed.iter().map(|t| t.name.to_string()).collect();
        let missed_tasks: Vec<String> = missed.iter().map(|t| t.name.to_string()).collect();

        let vitals_summary = summarize_vitals(activity.vitals.iter().filter(|v| v.date == date));
        let intake_summary =
            FluidBalance::from_records(activity.intake_output.iter().filter(|r| r.date == date));
        let observations = activity
            .observations
            .iter()
            .filter(|o| o.date == date)
            .map(ObservationRecord::marked)
            .collect();
        let abnormal_events: Vec<AbnormalEvent> = activity
            .abnormal_events
            .iter()
            .filter(|e| e.date == date)
            .cloned()
            .collect();

        let next_shift_focus = next_shift_focus(&missed_tasks, &abnormal_events, &intake_summary);

        ShiftReport {
            id: report_id(date, shift),
            date,
            shift,
            generated_at: generated_at.into(),
            completion_rate: self.tracker.completion_rate(activity.check_ins, date),
            completed_tasks,
            missed_tasks,
            abnormal_events,
            vitals_summary,
            intake_summary,
            observations,
            next_shift_focus,
        }
    }
}

/// Latest value per vital type, ordered by each type's first appearance.
fn summarize_vitals<'a>(vitals: impl Iterator<Item = &'a VitalSign>) -> Vec<VitalSummary> {
    let mut summary: Vec<VitalSummary> = Vec::new();
    for vital in vitals {
        let latest = VitalSummary {
            vital_type: vital.vital_type,
            latest: vital.value,
            is_abnormal: vital.is_abnormal,
        };
        match summary.iter_mut().find(|s| s.vital_type == vital.vital_type) {
            Some(existing) => *existing = latest,
            None => summary.push(latest),
        }
    }
    summary
}

fn next_shift_focus(
    missed_tasks: &[String],
    events: &[AbnormalEvent],
    balance: &FluidBalance,
) -> Vec<String> {
    let mut focus = Vec::new();

    if !missed_tasks.is_empty() {
        let names: Vec<&str> = missed_tasks
            .iter()
            .take(MISSED_TASKS_IN_FOCUS)
            .map(String::as_str)
            .collect();
        focus.push(format!("补做未完成任务: {}", names.join("、")));
    }

    let unresolved = events.iter().filter(|e| !e.status.is_resolved()).count();
    if unresolved > 0 {
        focus.push(format!("跟进{}个未解决异常事件", unresolved));
    }

    let net = balance.net();
    if net > FLUID_SURPLUS_THRESHOLD {
        focus.push("注意液体平衡，入量偏多".to_string());
    }
    if net < FLUID_DEFICIT_THRESHOLD {
        focus.push("注意补液，出量偏多".to_string());
    }

    focus
}
