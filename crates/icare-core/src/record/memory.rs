//! Process-local record store.
//!
//! Records are kept in their serialized JSON form so the store behaves like
//! a durable backend: what comes back out is a fresh copy, and entries that
//! no longer deserialize are skipped instead of failing the read.

use super::model::{Collection, Record};
use super::repository::{ProfileRepository, RecordRepository};
use crate::error::Result;
use crate::patient::PatientProfile;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// In-memory implementation of [`CareStore`](super::CareStore).
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    collections: RwLock<HashMap<Collection, Vec<Value>>>,
    profile: RwLock<Option<PatientProfile>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of raw entries held for `collection`.
    pub fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&collection)
            .map_or(0, Vec::len)
    }

    /// Pushes a raw entry, bypassing typing. Used to simulate foreign or
    /// damaged data.
    pub fn insert_raw(&self, collection: Collection, value: Value) {
        self.collections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(collection)
            .or_default()
            .push(value);
    }
}

impl<R: Record> RecordRepository<R> for InMemoryRecordStore {
    fn get_all(&self) -> Vec<R> {
        let collections = self
            .collections
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let Some(values) = collections.get(&R::COLLECTION) else {
            return Vec::new();
        };

        values
            .iter()
            .filter_map(|value| match serde_json::from_value::<R>(value.clone()) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(
                        collection = %R::COLLECTION,
                        "Skipping unreadable record: {}",
                        e
                    );
                    None
                }
            })
            .collect()
    }

    fn append(&self, record: &R) -> Result<()> {
        let value = serde_json::to_value(record)?;
        self.collections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(R::COLLECTION)
            .or_default()
            .push(value);
        Ok(())
    }

    fn upsert(&self, record: &R, matches: &dyn Fn(&R) -> bool) -> Result<()> {
        let value = serde_json::to_value(record)?;
        let mut collections = self
            .collections
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let values = collections.entry(R::COLLECTION).or_default();

        let position = values.iter().position(|existing| {
            serde_json::from_value::<R>(existing.clone())
                .map(|existing| matches(&existing))
                .unwrap_or(false)
        });

        match position {
            Some(index) => values[index] = value,
            None => values.push(value),
        }
        Ok(())
    }
}

impl ProfileRepository for InMemoryRecordStore {
    fn load_profile(&self) -> Option<PatientProfile> {
        self.profile
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save_profile(&self, profile: &PatientProfile) -> Result<()> {
        *self.profile.write().unwrap_or_else(PoisonError::into_inner) = Some(profile.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Shift;
    use crate::task::TaskCheckIn;
    use chrono::NaiveDate;

    fn check_in(task_id: &str, day: u32, note: Option<&str>) -> TaskCheckIn {
        TaskCheckIn {
            task_id: task_id.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 2, day).unwrap(),
            time: "08:00".to_string(),
            shift: Shift::Morning,
            note: note.map(str::to_string),
            completed: true,
            photo_uri: None,
        }
    }

    #[test]
    fn test_append_and_get_by_date() {
        let store = InMemoryRecordStore::new();
        store.append(&check_in("oral_care", 22, None)).unwrap();
        store.append(&check_in("oral_care", 23, None)).unwrap();

        let all: Vec<TaskCheckIn> = store.get_all();
        assert_eq!(all.len(), 2);

        let day: Vec<TaskCheckIn> =
            store.get_by_date(NaiveDate::from_ymd_opt(2026, 2, 23).unwrap());
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].date.to_string(), "2026-02-23");
    }

    #[test]
    fn test_upsert_replaces_first_match() {
        let store = InMemoryRecordStore::new();
        store.append(&check_in("oral_care", 22, Some("first"))).unwrap();

        let replacement = check_in("oral_care", 22, Some("second"));
        store
            .upsert(&replacement, &|c: &TaskCheckIn| {
                c.task_id == replacement.task_id && c.date == replacement.date
            })
            .unwrap();

        let all: Vec<TaskCheckIn> = store.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].note.as_deref(), Some("second"));
    }

    #[test]
    fn test_upsert_appends_without_match() {
        let store = InMemoryRecordStore::new();
        store.append(&check_in("oral_care", 22, None)).unwrap();
        store
            .upsert(&check_in("skin_check", 22, None), &|c: &TaskCheckIn| {
                c.task_id == "skin_check"
            })
            .unwrap();
        assert_eq!(store.len(Collection::CheckIns), 2);
    }

    #[test]
    fn test_unreadable_entries_are_skipped() {
        let store = InMemoryRecordStore::new();
        store.insert_raw(Collection::CheckIns, serde_json::json!({ "garbage": true }));
        store.append(&check_in("oral_care", 22, None)).unwrap();

        let all: Vec<TaskCheckIn> = store.get_all();
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn test_profile_round_trip() {
        let store = InMemoryRecordStore::new();
        assert!(store.load_profile().is_none());

        let mut profile = PatientProfile::default();
        profile.bed_number = "12".to_string();
        store.save_profile(&profile).unwrap();

        assert_eq!(store.load_profile(), Some(profile));
    }
}
