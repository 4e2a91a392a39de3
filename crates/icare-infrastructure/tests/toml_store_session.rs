//! End-to-end tests: a care session writing through the TOML store and a
//! second session reading the same directory back.

use icare_core::clock::{FixedClock, Shift};
use icare_core::event::{EventStatus, TransitionPolicy};
use icare_core::intake_output::IntakeOutputType;
use icare_core::observation::ObservationCategory;
use icare_core::record::{Collection, RecordRepository};
use icare_core::report::ShiftReport;
use icare_core::session::CareSession;
use icare_core::task::TaskRegistry;
use icare_core::vitals::{AlertLevel, VitalSign, VitalType};
use icare_infrastructure::TomlRecordStore;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn morning() -> FixedClock {
    FixedClock::at(2026, 3, 1, 9, 15).unwrap()
}

fn open(dir: &TempDir) -> CareSession<TomlRecordStore, FixedClock> {
    CareSession::new(Arc::new(TomlRecordStore::new(dir.path())), morning())
}

#[test]
fn test_day_of_care_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let event_id = {
        let mut session = open(&dir);
        session.check_in_task("oral_care", None).unwrap();
        session
            .check_in_task("turn_position", Some("左侧卧".to_string()))
            .unwrap();
        session
            .record_intake_output(IntakeOutputType::NasalFeed, Some(200.0), None, None)
            .unwrap();
        session
            .record_observation(ObservationCategory::Skin, "骶尾部轻微发红", true)
            .unwrap();
        let outcome = session.record_vital(VitalType::Spo2, 88.0).unwrap();
        outcome.event.unwrap().id
    };

    let session = open(&dir);
    let state = session.state();

    assert_eq!(state.today_check_ins.len(), 2);
    assert_eq!(state.today_vitals.len(), 1);
    assert_eq!(state.today_vitals[0].alert_level, AlertLevel::Red);
    assert_eq!(state.today_intake_output.len(), 1);
    assert_eq!(state.today_observations.len(), 1);
    assert_eq!(state.today_events.len(), 2);
    assert!(state.today_events.iter().any(|e| e.id == event_id));
    assert!((session.completion_rate() - 0.2).abs() < 1e-9);
}

#[test]
fn test_event_transitions_persist() {
    let dir = TempDir::new().unwrap();

    let event_id = {
        let mut session = open(&dir);
        let outcome = session.record_vital(VitalType::Temperature, 38.6).unwrap();
        let event_id = outcome.event.unwrap().id;
        session.acknowledge_event(&event_id).unwrap();
        session.resolve_event(&event_id, None).unwrap();
        event_id
    };

    let session = open(&dir);
    let event = session
        .state()
        .all_events
        .iter()
        .find(|e| e.id == event_id)
        .cloned()
        .unwrap();

    assert_eq!(event.status, EventStatus::Resolved);
    assert_eq!(event.resolved_note.as_deref(), Some("已处理"));
    assert!(event.acknowledged_at.is_some());
    assert!(event.resolved_at.is_some());
    assert!(session.pending_alerts().is_empty());
}

#[test]
fn test_strict_policy_rejects_and_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir);
    let event_id = session
        .record_vital(VitalType::HeartRate, 130.0)
        .unwrap()
        .event
        .unwrap()
        .id;
    let path = session.store().collection_path(Collection::AbnormalEvents);
    let before = fs::read_to_string(&path).unwrap();

    let err = session.resolve_event(&event_id, None).unwrap_err();

    assert!(err.is_invalid_transition());
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_permissive_policy_allows_direct_resolve() {
    let dir = TempDir::new().unwrap();
    let mut session = CareSession::with_options(
        Arc::new(TomlRecordStore::new(dir.path())),
        morning(),
        TaskRegistry::standard(),
        TransitionPolicy::Permissive,
    );
    let event_id = session
        .record_vital(VitalType::HeartRate, 130.0)
        .unwrap()
        .event
        .unwrap()
        .id;

    let event = session
        .resolve_event(&event_id, Some("医生已处理".to_string()))
        .unwrap();

    assert_eq!(event.status, EventStatus::Resolved);
    assert_eq!(event.resolved_note.as_deref(), Some("医生已处理"));
}

#[test]
fn test_report_regeneration_overwrites_on_disk() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir);

    let first = session.generate_report().unwrap();
    assert!(first.completed_tasks.is_empty());

    session.check_in_task("oral_care", None).unwrap();
    let second = session.generate_report().unwrap();

    let store = TomlRecordStore::new(dir.path());
    let reports: Vec<ShiftReport> = store.get_all();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].id, "report_2026-03-01_morning");
    assert_eq!(reports[0].shift, Shift::Morning);
    assert_eq!(reports[0].completed_tasks, second.completed_tasks);
    assert_eq!(reports[0].completed_tasks.len(), 1);
}

#[test]
fn test_report_with_events_round_trips() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir);
    session.record_vital(VitalType::Spo2, 92.0).unwrap();
    session
        .record_intake_output(IntakeOutputType::Urine, Some(900.0), None, None)
        .unwrap();

    let generated = session.generate_report().unwrap();
    let stored = session.shift_reports(None);

    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].abnormal_events.len(), 1);
    assert_eq!(stored[0].abnormal_events[0].alert_level, AlertLevel::Orange);
    assert_eq!(stored[0].next_shift_focus, generated.next_shift_focus);
}

#[test]
fn test_legacy_vitals_file_is_migrated_on_read() {
    let dir = TempDir::new().unwrap();
    let legacy = r#"
[[records]]
version = "1.0.0"
id = "legacy-1"
date = "2026-03-01"
time = "06:30"
vital_type = "blood_pressure_sys"
value = 150.0
is_abnormal = false
"#;
    fs::write(dir.path().join("vitals.toml"), legacy).unwrap();

    let session = open(&dir);
    let vitals = &session.state().today_vitals;

    assert_eq!(vitals.len(), 1);
    assert_eq!(vitals[0].alert_level, AlertLevel::Orange);
    assert!(vitals[0].is_abnormal);

    // The next write re-encodes the collection in the current schema.
    let store = TomlRecordStore::new(dir.path());
    store
        .append(&VitalSign::new(
            vitals[0].date,
            "10:00",
            VitalType::HeartRate,
            70.0,
        ))
        .unwrap();
    let raw = fs::read_to_string(dir.path().join("vitals.toml")).unwrap();
    assert!(!raw.contains("\"1.0.0\""));
}
