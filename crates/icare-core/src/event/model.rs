//! Abnormal event domain model.

use crate::record::{Collection, Record};
use crate::vitals::AlertLevel;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What produced an abnormal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    Vital,
    Observation,
    IntakeOutput,
}

impl EventSource {
    pub fn as_str(self) -> &'static str {
        match self {
            EventSource::Vital => "vital",
            EventSource::Observation => "observation",
            EventSource::IntakeOutput => "intake_output",
        }
    }
}

/// Lifecycle status of an abnormal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Pending,
    Acknowledged,
    Escalated,
    Resolved,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Acknowledged => "acknowledged",
            EventStatus::Escalated => "escalated",
            EventStatus::Resolved => "resolved",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Pending => "待处理",
            EventStatus::Acknowledged => "已确认",
            EventStatus::Escalated => "已上报",
            EventStatus::Resolved => "已解决",
        }
    }

    /// Pending or acknowledged: still waiting on the bedside caregiver.
    pub fn needs_attention(self) -> bool {
        matches!(self, EventStatus::Pending | EventStatus::Acknowledged)
    }

    pub fn is_resolved(self) -> bool {
        self == EventStatus::Resolved
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An incident opened by an out-of-range vital or an abnormal observation.
///
/// Events are never deleted. Status changes go through
/// [`EventLifecycle`](super::EventLifecycle).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbnormalEvent {
    pub id: String,
    pub date: NaiveDate,
    pub time: String,
    pub source: EventSource,
    /// Vital type or observation category name.
    pub category: String,
    pub description: String,
    pub alert_level: AlertLevel,
    pub status: EventStatus,
    pub acknowledged_at: Option<String>,
    pub escalated_at: Option<String>,
    pub resolved_at: Option<String>,
    pub resolved_note: Option<String>,
    pub related_vital_id: Option<String>,
}

impl Record for AbnormalEvent {
    const COLLECTION: Collection = Collection::AbnormalEvents;

    fn date(&self) -> NaiveDate {
        self.date
    }
}
