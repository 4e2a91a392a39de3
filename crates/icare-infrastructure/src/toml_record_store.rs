//! TOML-file backed implementation of the care record store.
//!
//! Layout under the data directory:
//!
//! ```text
//! <data_dir>/
//!   checkins.toml          [[records]] one table per check-in
//!   vitals.toml
//!   intake_output.toml
//!   observations.toml
//!   abnormal_events.toml
//!   shift_reports.toml
//!   patient_profile.toml   flat table
//! ```
//!
//! Each `*.toml` collection file has a `.lock` sibling used to serialize
//! writers across processes.

use crate::dto::{StoredRecord, create_patient_profile_migrator};
use crate::storage::{AtomicTomlError, AtomicTomlFile};
use icare_core::error::{CareError, Result};
use icare_core::patient::PatientProfile;
use icare_core::record::{Collection, ProfileRepository, RecordRepository};
use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

const PROFILE_FILE: &str = "patient_profile.toml";

/// On-disk shape of one collection file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CollectionDocument {
    #[serde(default)]
    records: Vec<Value>,
}

/// A record store keeping one TOML file per collection.
///
/// Responsibilities:
/// - Read a collection, migrating each entry to the current schema
/// - Serialize read-modify-write cycles under a per-file lock
/// - Move unreadable files aside instead of overwriting them
/// - Carry unreadable entries through rewrites unchanged
///
/// Does NOT:
/// - Cache anything; every call goes to disk
pub struct TomlRecordStore {
    data_dir: PathBuf,
}

impl TomlRecordStore {
    /// Creates a store rooted at `data_dir`. Nothing is touched until the
    /// first write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file backing `collection`.
    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(format!("{}.toml", collection.key()))
    }

    fn collection_file(&self, collection: Collection) -> AtomicTomlFile<CollectionDocument> {
        AtomicTomlFile::new(self.collection_path(collection))
    }

    fn read_collection<R: StoredRecord>(&self) -> Result<Vec<R>> {
        let document = self
            .collection_file(R::COLLECTION)
            .load()?
            .unwrap_or_default();

        Ok(decode_entries::<R>(document.records).records)
    }

    /// Runs `f` over the decoded collection and writes the result back,
    /// all under the collection lock.
    fn modify_collection<R, F>(&self, f: F) -> Result<()>
    where
        R: StoredRecord,
        F: FnOnce(&mut Vec<R>),
    {
        let file = self.collection_file(R::COLLECTION);
        let _lock = file.lock()?;

        let document = match file.load() {
            Ok(document) => document.unwrap_or_default(),
            Err(e) if e.is_corrupt() => {
                let moved = file.quarantine()?;
                tracing::warn!(
                    collection = %R::COLLECTION,
                    moved_to = ?moved,
                    "Collection file unreadable, starting a fresh one: {}",
                    e
                );
                CollectionDocument::default()
            }
            Err(e) => return Err(e.into()),
        };

        let DecodedEntries { mut records, held } = decode_entries::<R>(document.records);
        f(&mut records);

        let mut entries = R::encode_all(&records)?;
        for (index, raw) in held.iter().cloned() {
            let at = index.min(entries.len());
            entries.insert(at, raw);
        }
        file.save(&CollectionDocument { records: entries })?;

        tracing::debug!(
            collection = %R::COLLECTION,
            count = records.len(),
            held = held.len(),
            "Collection written"
        );
        Ok(())
    }

    fn profile_file(&self) -> AtomicTomlFile<Value> {
        AtomicTomlFile::new(self.data_dir.join(PROFILE_FILE))
    }

    fn read_profile(&self) -> Result<Option<PatientProfile>> {
        let Some(value) = self.profile_file().load()? else {
            return Ok(None);
        };

        let migrator = create_patient_profile_migrator();
        let profile = migrator
            .load_flat_from("patient_profile", value)
            .map_err(|e| CareError::migration(format!("Failed to migrate patient profile: {}", e)))?;

        Ok(Some(profile))
    }
}

/// Result of decoding a collection file.
struct DecodedEntries<R> {
    records: Vec<R>,
    /// Entries that could not be decoded, with their position in the file.
    /// Rewrites put them back verbatim.
    held: Vec<(usize, Value)>,
}

/// Decodes entries one by one. Unreadable entries and entries written by a
/// newer schema are logged and held aside as raw values.
fn decode_entries<R: StoredRecord>(values: Vec<Value>) -> DecodedEntries<R> {
    let collection = R::COLLECTION;
    let mut decoded = DecodedEntries {
        records: Vec::with_capacity(values.len()),
        held: Vec::new(),
    };

    for (index, value) in values.into_iter().enumerate() {
        if is_newer_schema(&value, R::VERSION) {
            tracing::warn!(%collection, index, "Skipping entry from a newer schema");
            decoded.held.push((index, value));
            continue;
        }
        match R::decode(value.clone()) {
            Ok(record) => decoded.records.push(record),
            Err(e) => {
                tracing::warn!(%collection, index, "Skipping unreadable entry: {}", e);
                decoded.held.push((index, value));
            }
        }
    }
    decoded
}

/// True when the entry's `version` is a semver above `current`.
fn is_newer_schema(value: &Value, current: &str) -> bool {
    let stored = value
        .get("version")
        .and_then(Value::as_str)
        .and_then(|v| Version::parse(v).ok());
    match (stored, Version::parse(current).ok()) {
        (Some(stored), Some(current)) => stored > current,
        _ => false,
    }
}

impl<R: StoredRecord> RecordRepository<R> for TomlRecordStore {
    fn get_all(&self) -> Vec<R> {
        self.read_collection().unwrap_or_else(|e| {
            tracing::warn!(collection = %R::COLLECTION, "Failed to read collection: {}", e);
            Vec::new()
        })
    }

    fn append(&self, record: &R) -> Result<()> {
        self.modify_collection(|records: &mut Vec<R>| records.push(record.clone()))
    }

    fn upsert(&self, record: &R, matches: &dyn Fn(&R) -> bool) -> Result<()> {
        self.modify_collection(|records: &mut Vec<R>| {
            match records.iter_mut().find(|existing| matches(&**existing)) {
                Some(existing) => *existing = record.clone(),
                None => records.push(record.clone()),
            }
        })
    }
}

impl ProfileRepository for TomlRecordStore {
    fn load_profile(&self) -> Option<PatientProfile> {
        self.read_profile().unwrap_or_else(|e| {
            tracing::warn!("Failed to read patient profile: {}", e);
            None
        })
    }

    fn save_profile(&self, profile: &PatientProfile) -> Result<()> {
        let file = self.profile_file();
        let _lock = file.lock()?;

        let migrator = create_patient_profile_migrator();
        let json_str = migrator
            .save_domain_flat("patient_profile", profile.clone())
            .map_err(|e| CareError::migration(format!("Failed to serialize patient profile: {}", e)))?;
        let value: Value = serde_json::from_str(&json_str)?;

        file.save(&value).map_err(|e: AtomicTomlError| {
            CareError::io(format!("Failed to write {}: {}", PROFILE_FILE, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use icare_core::clock::Shift;
    use icare_core::task::TaskCheckIn;
    use icare_core::vitals::{AlertLevel, VitalSign, VitalType};
    use std::fs;
    use tempfile::TempDir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn check_in(task_id: &str, time: &str) -> TaskCheckIn {
        TaskCheckIn {
            task_id: task_id.to_string(),
            date: day(),
            time: time.to_string(),
            shift: Shift::Morning,
            note: None,
            completed: true,
            photo_uri: None,
        }
    }

    #[test]
    fn test_missing_collection_reads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlRecordStore::new(temp_dir.path());

        let vitals: Vec<VitalSign> = store.get_all();
        assert!(vitals.is_empty());
    }

    #[test]
    fn test_append_preserves_order_and_version() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlRecordStore::new(temp_dir.path());

        store.append(&check_in("oral_care", "08:00")).unwrap();
        store.append(&check_in("turn_position", "09:00")).unwrap();

        let all: Vec<TaskCheckIn> = store.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].task_id, "oral_care");
        assert_eq!(all[1].task_id, "turn_position");

        let raw = fs::read_to_string(store.collection_path(Collection::CheckIns)).unwrap();
        assert!(raw.contains("version = \"1.0.0\""));
    }

    #[test]
    fn test_upsert_replaces_matching_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlRecordStore::new(temp_dir.path());
        let first = check_in("oral_care", "08:00");
        store.append(&first).unwrap();

        let second = check_in("oral_care", "10:30");
        store
            .upsert(&second, &|existing: &TaskCheckIn| existing.same_slot(&second))
            .unwrap();

        let all: Vec<TaskCheckIn> = store.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].time, "10:30");
    }

    #[test]
    fn test_get_by_date_filters() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlRecordStore::new(temp_dir.path());
        let other_day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

        store
            .append(&VitalSign::new(day(), "08:00", VitalType::Spo2, 97.0))
            .unwrap();
        store
            .append(&VitalSign::new(other_day, "08:00", VitalType::Spo2, 88.0))
            .unwrap();

        let today: Vec<VitalSign> = store.get_by_date(day());
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].alert_level, AlertLevel::None);
    }

    #[test]
    fn test_unreadable_entry_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlRecordStore::new(temp_dir.path());
        let raw = r#"
[[records]]
version = "1.0.0"
task_id = "oral_care"
date = "2026-03-01"
time = "08:00"
shift = "morning"

[[records]]
version = "1.0.0"
unexpected = true
"#;
        fs::write(store.collection_path(Collection::CheckIns), raw).unwrap();

        let all: Vec<TaskCheckIn> = store.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].task_id, "oral_care");
        assert!(all[0].completed);
    }

    #[test]
    fn test_unreadable_entry_survives_rewrite() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlRecordStore::new(temp_dir.path());
        let raw = r#"
[[records]]
version = "1.1.0"
id = "future-1"
date = "2026-03-01"
time = "07:00"
vital_type = "glucose"
value = 6.1
is_abnormal = false
alert_level = "none"

[[records]]
version = "1.1.0"
id = "hr-1"
date = "2026-03-01"
time = "07:30"
vital_type = "heart_rate"
value = 72.0
is_abnormal = false
alert_level = "none"
"#;
        let path = store.collection_path(Collection::Vitals);
        fs::write(&path, raw).unwrap();

        store
            .append(&VitalSign::new(day(), "08:00", VitalType::HeartRate, 80.0))
            .unwrap();

        let vitals: Vec<VitalSign> = store.get_all();
        assert_eq!(vitals.len(), 2);

        let document: CollectionDocument =
            toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(document.records.len(), 3);
        assert_eq!(document.records[0]["id"], "future-1");
        assert_eq!(document.records[0]["vital_type"], "glucose");
        assert_eq!(document.records[1]["id"], "hr-1");
    }

    #[test]
    fn test_newer_schema_entry_is_not_downgraded() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlRecordStore::new(temp_dir.path());
        let raw = r#"
[[records]]
version = "2.0.0"
id = "v2-1"
date = "2026-03-01"
time = "07:00"
vital_type = "temperature"
value = 36.8
is_abnormal = false
alert_level = "none"
trend = "stable"
"#;
        let path = store.collection_path(Collection::Vitals);
        fs::write(&path, raw).unwrap();

        let vitals: Vec<VitalSign> = store.get_all();
        assert!(vitals.is_empty());

        store
            .append(&VitalSign::new(day(), "08:00", VitalType::Spo2, 97.0))
            .unwrap();

        let document: CollectionDocument =
            toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(document.records.len(), 2);
        assert_eq!(document.records[0]["version"], "2.0.0");
        assert_eq!(document.records[0]["trend"], "stable");
        assert_eq!(document.records[1]["version"], "1.1.0");
    }

    #[test]
    fn test_corrupt_collection_reads_empty_and_is_replaced_on_write() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlRecordStore::new(temp_dir.path());
        let path = store.collection_path(Collection::CheckIns);
        fs::write(&path, "records = [[[ not toml").unwrap();

        let all: Vec<TaskCheckIn> = store.get_all();
        assert!(all.is_empty());

        store.append(&check_in("oral_care", "08:00")).unwrap();

        let all: Vec<TaskCheckIn> = store.get_all();
        assert_eq!(all.len(), 1);

        let quarantined = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with("checkins.toml.corrupt-")
            })
            .count();
        assert_eq!(quarantined, 1);
    }

    #[test]
    fn test_profile_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlRecordStore::new(temp_dir.path());
        assert!(store.load_profile().is_none());

        let mut profile = PatientProfile::default();
        profile.bed_number = "3-12".to_string();
        store.save_profile(&profile).unwrap();

        assert_eq!(store.load_profile(), Some(profile));
    }

    #[test]
    fn test_corrupt_profile_loads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlRecordStore::new(temp_dir.path());
        fs::write(temp_dir.path().join(PROFILE_FILE), "name = ").unwrap();

        assert!(store.load_profile().is_none());
    }
}
