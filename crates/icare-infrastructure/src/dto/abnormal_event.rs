//! AbnormalEvent DTOs and migrations

use chrono::NaiveDate;
use icare_core::event::{AbnormalEvent, EventSource, EventStatus};
use icare_core::vitals::AlertLevel;
use serde::{Deserialize, Serialize};
use version_migrate::{IntoDomain, Versioned};

/// Abnormal event V1.0.0.
///
/// Also embedded, without a version field, inside stored shift reports.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct AbnormalEventV1_0_0 {
    pub id: String,
    pub date: NaiveDate,
    pub time: String,
    #[serde(rename = "type")]
    pub source: EventSource,
    pub category: String,
    pub description: String,
    pub alert_level: AlertLevel,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledged_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_vital_id: Option<String>,
}

impl IntoDomain<AbnormalEvent> for AbnormalEventV1_0_0 {
    fn into_domain(self) -> AbnormalEvent {
        AbnormalEvent {
            id: self.id,
            date: self.date,
            time: self.time,
            source: self.source,
            category: self.category,
            description: self.description,
            alert_level: self.alert_level,
            status: self.status,
            acknowledged_at: self.acknowledged_at,
            escalated_at: self.escalated_at,
            resolved_at: self.resolved_at,
            resolved_note: self.resolved_note,
            related_vital_id: self.related_vital_id,
        }
    }
}

impl From<&AbnormalEvent> for AbnormalEventV1_0_0 {
    fn from(event: &AbnormalEvent) -> Self {
        AbnormalEventV1_0_0 {
            id: event.id.clone(),
            date: event.date,
            time: event.time.clone(),
            source: event.source,
            category: event.category.clone(),
            description: event.description.clone(),
            alert_level: event.alert_level,
            status: event.status,
            acknowledged_at: event.acknowledged_at.clone(),
            escalated_at: event.escalated_at.clone(),
            resolved_at: event.resolved_at.clone(),
            resolved_note: event.resolved_note.clone(),
            related_vital_id: event.related_vital_id.clone(),
        }
    }
}

/// Creates and configures a Migrator instance for AbnormalEvent entities.
pub fn create_abnormal_event_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let event_path = version_migrate::Migrator::define("abnormal_event")
        .from::<AbnormalEventV1_0_0>()
        .into::<AbnormalEvent>();

    migrator
        .register(event_path)
        .expect("Failed to register abnormal_event migration path");

    migrator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_event_omits_empty_timestamps() {
        let migrator = create_abnormal_event_migrator();
        let event = AbnormalEvent {
            id: "e-1".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            time: "10:00".to_string(),
            source: EventSource::Vital,
            category: "spo2".to_string(),
            description: "血氧 88% 异常".to_string(),
            alert_level: AlertLevel::Red,
            status: EventStatus::Pending,
            acknowledged_at: None,
            escalated_at: None,
            resolved_at: None,
            resolved_note: None,
            related_vital_id: Some("v-1".to_string()),
        };

        let json = migrator
            .save_vec_flat(vec![AbnormalEventV1_0_0::from(&event)])
            .unwrap();

        assert!(!json.contains("null"));
        assert!(!json.contains("acknowledged_at"));
        assert!(json.contains("\"type\":\"vital\""));
    }

    #[test]
    fn test_missing_status_loads_as_pending() {
        let migrator = create_abnormal_event_migrator();
        let value = serde_json::json!({
            "version": "1.0.0",
            "id": "e-2",
            "date": "2026-03-01",
            "time": "10:00",
            "type": "observation",
            "category": "skin",
            "description": "骶尾部发红",
            "alert_level": "orange"
        });

        let events: Vec<AbnormalEvent> = migrator
            .load_vec_flat_from("abnormal_event", vec![value])
            .unwrap();

        assert_eq!(events[0].status, EventStatus::Pending);
        assert_eq!(events[0].source, EventSource::Observation);
    }
}
