//! In-memory session snapshot and its pure reducer.

use crate::clock::Shift;
use crate::event::AbnormalEvent;
use crate::intake_output::IntakeOutputRecord;
use crate::observation::ObservationRecord;
use crate::patient::PatientProfile;
use crate::task::{TaskCheckIn, upsert_check_in};
use crate::vitals::VitalSign;
use chrono::NaiveDate;
use serde::Serialize;

/// Snapshot of "today" and "all-time" care data held by a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub today_check_ins: Vec<TaskCheckIn>,
    pub today_vitals: Vec<VitalSign>,
    pub today_intake_output: Vec<IntakeOutputRecord>,
    pub today_observations: Vec<ObservationRecord>,
    pub today_events: Vec<AbnormalEvent>,
    pub all_vitals: Vec<VitalSign>,
    pub all_check_ins: Vec<TaskCheckIn>,
    pub all_events: Vec<AbnormalEvent>,
    pub patient: PatientProfile,
    pub current_shift: Shift,
    pub current_date: NaiveDate,
    pub loading: bool,
}

impl SessionState {
    /// Empty state for `date`, flagged as loading until the first refresh.
    pub fn new(date: NaiveDate, shift: Shift) -> Self {
        Self {
            today_check_ins: Vec::new(),
            today_vitals: Vec::new(),
            today_intake_output: Vec::new(),
            today_observations: Vec::new(),
            today_events: Vec::new(),
            all_vitals: Vec::new(),
            all_check_ins: Vec::new(),
            all_events: Vec::new(),
            patient: PatientProfile::default(),
            current_shift: shift,
            current_date: date,
            loading: true,
        }
    }
}

/// Data read from storage during a refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub shift: Shift,
    pub check_ins: Vec<TaskCheckIn>,
    pub vitals: Vec<VitalSign>,
    pub intake_output: Vec<IntakeOutputRecord>,
    pub observations: Vec<ObservationRecord>,
    pub events: Vec<AbnormalEvent>,
    pub patient: PatientProfile,
}

/// A state transition. Every variant describes something already persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    SetLoading(bool),
    Loaded(Box<Snapshot>),
    CheckInRecorded(TaskCheckIn),
    VitalRecorded(VitalSign),
    IntakeOutputRecorded(IntakeOutputRecord),
    ObservationRecorded(ObservationRecord),
    EventOpened(AbnormalEvent),
    EventUpdated(AbnormalEvent),
    PatientUpdated(PatientProfile),
}

/// Applies `action` to `state`, returning the next state.
pub fn reduce(mut state: SessionState, action: SessionAction) -> SessionState {
    match action {
        SessionAction::SetLoading(loading) => state.loading = loading,
        SessionAction::Loaded(snapshot) => {
            let Snapshot {
                date,
                shift,
                check_ins,
                vitals,
                intake_output,
                observations,
                events,
                patient,
            } = *snapshot;

            state.current_date = date;
            state.current_shift = shift;
            state.today_check_ins = on_date(&check_ins, date, |c| c.date);
            state.today_vitals = on_date(&vitals, date, |v| v.date);
            state.today_intake_output = on_date(&intake_output, date, |r| r.date);
            state.today_observations = on_date(&observations, date, |o| o.date);
            state.today_events = on_date(&events, date, |e| e.date);
            state.all_check_ins = check_ins;
            state.all_vitals = vitals;
            state.all_events = events;
            state.patient = patient;
        }
        SessionAction::CheckInRecorded(check_in) => {
            if check_in.date == state.current_date {
                upsert_check_in(&mut state.today_check_ins, check_in.clone());
            }
            upsert_check_in(&mut state.all_check_ins, check_in);
        }
        SessionAction::VitalRecorded(vital) => {
            if vital.date == state.current_date {
                state.today_vitals.push(vital.clone());
            }
            state.all_vitals.push(vital);
        }
        SessionAction::IntakeOutputRecorded(record) => {
            if record.date == state.current_date {
                state.today_intake_output.push(record);
            }
        }
        SessionAction::ObservationRecorded(record) => {
            if record.date == state.current_date {
                state.today_observations.push(record);
            }
        }
        SessionAction::EventOpened(event) => {
            if event.date == state.current_date {
                state.today_events.push(event.clone());
            }
            state.all_events.push(event);
        }
        SessionAction::EventUpdated(event) => {
            replace_event(&mut state.today_events, &event);
            replace_event(&mut state.all_events, &event);
        }
        SessionAction::PatientUpdated(patient) => state.patient = patient,
    }
    state
}

fn on_date<T: Clone>(items: &[T], date: NaiveDate, date_of: impl Fn(&T) -> NaiveDate) -> Vec<T> {
    items
        .iter()
        .filter(|item| date_of(item) == date)
        .cloned()
        .collect()
}

fn replace_event(events: &mut [AbnormalEvent], updated: &AbnormalEvent) {
    if let Some(slot) = events.iter_mut().find(|e| e.id == updated.id) {
        *slot = updated.clone();
    }
}
