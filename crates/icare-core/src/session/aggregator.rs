//! The care session façade.

use super::state::{SessionAction, SessionState, Snapshot, reduce};
use crate::clock::{Clock, Shift, SystemClock};
use crate::error::{CareError, Result};
use crate::event::{AbnormalEvent, EventAction, EventGroups, EventLifecycle, TransitionPolicy, views};
use crate::intake_output::{IntakeOutputRecord, IntakeOutputType};
use crate::observation::{ObservationCategory, ObservationRecord};
use crate::patient::PatientProfile;
use crate::record::{CareStore, Record, RecordRepository};
use crate::report::{ShiftActivity, ShiftReport, ShiftReportSynthesizer};
use crate::task::{CheckInTracker, DailyCompletion, RequiredData, TaskCheckIn, TaskRegistry};
use crate::vitals::{AlertLevel, VitalSign, VitalType};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};

/// A stored reading and the event it opened, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct VitalOutcome {
    pub vital: VitalSign,
    pub event: Option<AbnormalEvent>,
}

impl VitalOutcome {
    pub fn alert_level(&self) -> AlertLevel {
        self.vital.alert_level
    }
}

/// A stored observation and the event it opened, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationOutcome {
    pub observation: ObservationRecord,
    pub event: Option<AbnormalEvent>,
}

/// Intake/output entry captured while completing a task.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeOutputEntry {
    pub io_type: IntakeOutputType,
    pub amount: Option<f64>,
    pub stool_type: Option<String>,
    pub note: Option<String>,
}

/// Observation text captured while completing a task.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationEntry {
    pub content: String,
    pub is_abnormal: bool,
}

/// Everything entered on a task's completion form.
///
/// Only the data matching the task's [`RequiredData`] kind is recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskSubmission {
    pub note: Option<String>,
    pub vitals: Vec<(VitalType, Option<f64>)>,
    pub intake_output: Option<IntakeOutputEntry>,
    pub observation: Option<ObservationEntry>,
}

/// What a task submission wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    pub check_in: TaskCheckIn,
    pub vitals: Vec<VitalOutcome>,
    pub intake_output: Option<IntakeOutputRecord>,
    pub observation: Option<ObservationOutcome>,
}

impl SubmissionOutcome {
    /// Vital types that came back orange or red, with their level.
    pub fn alerts(&self) -> Vec<(VitalType, AlertLevel)> {
        self.vitals
            .iter()
            .filter(|outcome| outcome.alert_level().is_alert())
            .map(|outcome| (outcome.vital.vital_type, outcome.alert_level()))
            .collect()
    }
}

/// Single-patient care session.
///
/// `CareSession` owns the in-memory snapshot and is the only writer of the
/// store it is given. Every mutation:
/// 1. Validates and classifies the input
/// 2. Writes through to the store
/// 3. Reduces the change into [`SessionState`]
///
/// A failed write leaves the snapshot untouched.
pub struct CareSession<S: CareStore, C: Clock = SystemClock> {
    store: Arc<S>,
    clock: C,
    tracker: CheckInTracker,
    lifecycle: EventLifecycle,
    synthesizer: ShiftReportSynthesizer,
    state: SessionState,
}

impl<S: CareStore, C: Clock> CareSession<S, C> {
    /// Opens a session over `store` with the standard task catalogue and
    /// strict event transitions, loading today's data.
    pub fn new(store: Arc<S>, clock: C) -> Self {
        Self::with_options(store, clock, TaskRegistry::standard(), TransitionPolicy::Strict)
    }

    pub fn with_options(
        store: Arc<S>,
        clock: C,
        registry: TaskRegistry,
        policy: TransitionPolicy,
    ) -> Self {
        let state = SessionState::new(clock.today(), clock.current_shift());
        let mut session = Self {
            store,
            clock,
            tracker: CheckInTracker::new(registry),
            lifecycle: EventLifecycle::new(policy),
            synthesizer: ShiftReportSynthesizer::new(registry),
            state,
        };
        session.refresh();
        session
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn registry(&self) -> &TaskRegistry {
        self.tracker.registry()
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.lifecycle.policy()
    }

    /// Reloads today's and all-time views from the store.
    pub fn refresh(&mut self) {
        self.dispatch(SessionAction::SetLoading(true));

        let snapshot = Snapshot {
            date: self.clock.today(),
            shift: self.clock.current_shift(),
            check_ins: self.load(),
            vitals: self.load(),
            intake_output: self.load(),
            observations: self.load(),
            events: self.load(),
            patient: self.store.load_profile().unwrap_or_default(),
        };
        debug!(
            date = %snapshot.date,
            shift = %snapshot.shift,
            check_ins = snapshot.check_ins.len(),
            events = snapshot.events.len(),
            "Session refreshed"
        );
        self.dispatch(SessionAction::Loaded(Box::new(snapshot)));
        self.dispatch(SessionAction::SetLoading(false));
    }

    /// Records completion of `task_id` for today, replacing any earlier
    /// check-in of the same task today.
    pub fn check_in_task(&mut self, task_id: &str, note: Option<String>) -> Result<TaskCheckIn> {
        self.roll_over_if_needed();
        if !self.registry().contains(task_id) {
            return Err(CareError::not_found("CareTask", task_id));
        }

        let check_in = self.tracker.check_in(
            task_id,
            self.clock.today(),
            self.clock.time_str(),
            self.clock.current_shift(),
            note,
        );
        self.upsert(&check_in, |c: &TaskCheckIn| c.same_slot(&check_in))?;
        debug!(task_id, date = %check_in.date, "Task checked in");

        self.dispatch(SessionAction::CheckInRecorded(check_in.clone()));
        Ok(check_in)
    }

    /// Stores a reading and opens an event when it is out of range.
    ///
    /// Non-finite readings are rejected before anything is written.
    pub fn record_vital(&mut self, vital_type: VitalType, value: f64) -> Result<VitalOutcome> {
        if !value.is_finite() {
            return Err(CareError::invalid_value(vital_type.to_string(), value));
        }
        self.roll_over_if_needed();
        let vital = VitalSign::new(self.clock.today(), self.clock.time_str(), vital_type, value);
        self.append(&vital)?;
        debug!(vital_type = %vital_type, value, alert = %vital.alert_level, "Vital recorded");
        self.dispatch(SessionAction::VitalRecorded(vital.clone()));

        let event = self.lifecycle.open_for_vital(&vital);
        if let Some(event) = &event {
            self.open_event(event)?;
        }
        Ok(VitalOutcome { vital, event })
    }

    /// Stores an intake/output entry.
    ///
    /// Entries without an amount are skipped, except stool entries that
    /// carry a descriptor.
    pub fn record_intake_output(
        &mut self,
        io_type: IntakeOutputType,
        amount: Option<f64>,
        stool_type: Option<String>,
        note: Option<String>,
    ) -> Result<Option<IntakeOutputRecord>> {
        let stool_type = stool_type.filter(|s| !s.trim().is_empty());
        let described_stool = io_type == IntakeOutputType::Stool && stool_type.is_some();
        if amount.is_none() && !described_stool {
            debug!(io_type = %io_type, "Skipping intake/output entry without amount");
            return Ok(None);
        }

        self.roll_over_if_needed();
        let record = IntakeOutputRecord::new(
            self.clock.today(),
            self.clock.time_str(),
            io_type,
            amount,
            stool_type,
            note.filter(|n| !n.trim().is_empty()),
        );
        self.append(&record)?;
        debug!(io_type = %io_type, amount = ?amount, "Intake/output recorded");

        self.dispatch(SessionAction::IntakeOutputRecorded(record.clone()));
        Ok(Some(record))
    }

    /// Stores an observation and opens an orange event when it is abnormal.
    pub fn record_observation(
        &mut self,
        category: ObservationCategory,
        content: &str,
        is_abnormal: bool,
    ) -> Result<ObservationOutcome> {
        self.roll_over_if_needed();
        let observation = ObservationRecord::new(
            self.clock.today(),
            self.clock.time_str(),
            category,
            content,
            is_abnormal,
        );
        self.append(&observation)?;
        debug!(category = %category, is_abnormal, "Observation recorded");
        self.dispatch(SessionAction::ObservationRecorded(observation.clone()));

        let event = self.lifecycle.open_for_observation(&observation);
        if let Some(event) = &event {
            self.open_event(event)?;
        }
        Ok(ObservationOutcome { observation, event })
    }

    /// Records the data implied by the task's required-data kind, then
    /// checks the task in.
    pub fn submit_task(&mut self, task_id: &str, submission: TaskSubmission) -> Result<SubmissionOutcome> {
        let task = self
            .registry()
            .find(task_id)
            .ok_or_else(|| CareError::not_found("CareTask", task_id))?;

        let mut vitals = Vec::new();
        let mut intake_output = None;
        let mut observation = None;

        match task.required_data {
            Some(RequiredData::Vitals) => {
                for (vital_type, value) in submission.vitals {
                    if let Some(value) = value.filter(|v| v.is_finite()) {
                        vitals.push(self.record_vital(vital_type, value)?);
                    }
                }
            }
            Some(RequiredData::IntakeOutput) => {
                if let Some(entry) = submission.intake_output.filter(|e| e.amount.is_some()) {
                    intake_output = self.record_intake_output(
                        entry.io_type,
                        entry.amount,
                        entry.stool_type,
                        entry.note,
                    )?;
                }
            }
            Some(RequiredData::ObservationText) => {
                if let Some(entry) = submission
                    .observation
                    .filter(|o| !o.content.trim().is_empty())
                {
                    observation = Some(self.record_observation(
                        ObservationCategory::for_task(task_id),
                        &entry.content,
                        entry.is_abnormal,
                    )?);
                }
            }
            None => {}
        }

        let check_in = self.check_in_task(task_id, submission.note)?;
        info!(task_id, vitals = vitals.len(), "Task submitted");

        Ok(SubmissionOutcome {
            check_in,
            vitals,
            intake_output,
            observation,
        })
    }

    /// Replaces the patient profile.
    pub fn update_patient_profile(&mut self, profile: PatientProfile) -> Result<()> {
        self.store.save_profile(&profile)?;
        debug!(name = %profile.name, "Patient profile updated");
        self.dispatch(SessionAction::PatientUpdated(profile));
        Ok(())
    }

    pub fn acknowledge_event(&mut self, event_id: &str) -> Result<AbnormalEvent> {
        self.transition(event_id, EventAction::Acknowledge)
    }

    pub fn resolve_event(&mut self, event_id: &str, note: Option<String>) -> Result<AbnormalEvent> {
        self.transition(event_id, EventAction::Resolve { note })
    }

    pub fn escalate_event(&mut self, event_id: &str) -> Result<AbnormalEvent> {
        self.transition(event_id, EventAction::Escalate)
    }

    /// Generates and stores the report for the current date and shift.
    pub fn generate_report(&mut self) -> Result<ShiftReport> {
        self.roll_over_if_needed();
        self.generate_report_for(self.clock.today(), self.clock.current_shift())
    }

    /// Generates and stores the report for `date` and `shift`, overwriting
    /// any earlier report for the same pair.
    pub fn generate_report_for(&mut self, date: NaiveDate, shift: Shift) -> Result<ShiftReport> {
        let check_ins: Vec<TaskCheckIn> = self.load_by_date(date);
        let vitals: Vec<VitalSign> = self.load_by_date(date);
        let intake_output: Vec<IntakeOutputRecord> = self.load_by_date(date);
        let observations: Vec<ObservationRecord> = self.load_by_date(date);
        let abnormal_events: Vec<AbnormalEvent> = self.load_by_date(date);

        let report = self.synthesizer.generate(
            date,
            shift,
            self.clock.time_str(),
            ShiftActivity {
                check_ins: &check_ins,
                vitals: &vitals,
                intake_output: &intake_output,
                observations: &observations,
                abnormal_events: &abnormal_events,
            },
        );
        self.upsert(&report, |r: &ShiftReport| r.id == report.id)?;
        info!(
            report_id = %report.id,
            completion = report.completion_percent(),
            unresolved = report.unresolved_count(),
            "Shift report generated"
        );
        Ok(report)
    }

    /// Stored reports, optionally restricted to one date.
    pub fn shift_reports(&self, date: Option<NaiveDate>) -> Vec<ShiftReport> {
        match date {
            Some(date) => self.load_by_date(date),
            None => self.load(),
        }
    }

    /// Fraction of registry tasks checked in today.
    pub fn completion_rate(&self) -> f64 {
        self.tracker
            .completion_rate(&self.state.today_check_ins, self.state.current_date)
    }

    /// Today's events that are pending or acknowledged.
    pub fn pending_alerts(&self) -> Vec<AbnormalEvent> {
        views::needing_attention(&self.state.today_events)
    }

    /// Completion rate per day for the last `days` days, oldest first.
    pub fn completion_trend(&self, days: u32) -> Vec<DailyCompletion> {
        self.tracker
            .trend(&self.state.all_check_ins, self.state.current_date, days)
    }

    /// All events, newest first.
    pub fn events_newest_first(&self) -> Vec<AbnormalEvent> {
        views::newest_first(&self.state.all_events)
    }

    /// All events grouped by lifecycle stage.
    pub fn event_groups(&self) -> EventGroups {
        views::group_by_status(&self.state.all_events)
    }

    /// The `limit` most recent events.
    pub fn recent_events(&self, limit: usize) -> Vec<AbnormalEvent> {
        views::recent(&self.state.all_events, limit)
    }

    fn transition(&mut self, event_id: &str, action: EventAction) -> Result<AbnormalEvent> {
        self.roll_over_if_needed();
        let events: Vec<AbnormalEvent> = self.load();
        let current = events
            .into_iter()
            .find(|e| e.id == event_id)
            .ok_or_else(|| CareError::not_found("AbnormalEvent", event_id))?;

        let updated = self
            .lifecycle
            .apply(&current, &action, &self.clock.time_str())?;
        self.upsert(&updated, |e: &AbnormalEvent| e.id == updated.id)?;
        info!(
            event_id,
            from = %current.status,
            to = %updated.status,
            "Abnormal event {}",
            action
        );

        self.dispatch(SessionAction::EventUpdated(updated.clone()));
        Ok(updated)
    }

    fn open_event(&mut self, event: &AbnormalEvent) -> Result<()> {
        self.append(event)?;
        info!(
            event_id = %event.id,
            category = %event.category,
            level = %event.alert_level,
            "Abnormal event opened"
        );
        self.dispatch(SessionAction::EventOpened(event.clone()));
        Ok(())
    }

    /// Reloads when the calendar day has changed since the last refresh.
    fn roll_over_if_needed(&mut self) {
        if self.clock.today() != self.state.current_date {
            info!(
                from = %self.state.current_date,
                to = %self.clock.today(),
                "Day changed, reloading session"
            );
            self.refresh();
        }
    }

    fn dispatch(&mut self, action: SessionAction) {
        let placeholder = SessionState::new(self.state.current_date, self.state.current_shift);
        let state = std::mem::replace(&mut self.state, placeholder);
        self.state = reduce(state, action);
    }

    fn load<R: Record>(&self) -> Vec<R>
    where
        S: RecordRepository<R>,
    {
        RecordRepository::<R>::get_all(self.store.as_ref())
    }

    fn load_by_date<R: Record>(&self, date: NaiveDate) -> Vec<R>
    where
        S: RecordRepository<R>,
    {
        RecordRepository::<R>::get_by_date(self.store.as_ref(), date)
    }

    fn append<R: Record>(&self, record: &R) -> Result<()>
    where
        S: RecordRepository<R>,
    {
        RecordRepository::<R>::append(self.store.as_ref(), record)
    }

    fn upsert<R: Record>(&self, record: &R, matches: impl Fn(&R) -> bool) -> Result<()>
    where
        S: RecordRepository<R>,
    {
        RecordRepository::<R>::upsert(self.store.as_ref(), record, &matches)
    }
}
