//! Abnormal event creation and status transitions.

use super::model::{AbnormalEvent, EventSource, EventStatus};
use crate::error::{CareError, Result};
use crate::observation::ObservationRecord;
use crate::vitals::{AlertLevel, VitalSign};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Note stamped on a resolution when the caregiver leaves none.
pub const DEFAULT_RESOLVE_NOTE: &str = "已处理";

/// How strictly status transitions are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Only the documented edges are allowed.
    #[default]
    Strict,
    /// Any action is applied from any status.
    Permissive,
}

impl TransitionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            TransitionPolicy::Strict => "strict",
            TransitionPolicy::Permissive => "permissive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "strict" => Some(TransitionPolicy::Strict),
            "permissive" => Some(TransitionPolicy::Permissive),
            _ => None,
        }
    }
}

/// A caregiver action on an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventAction {
    Acknowledge,
    Escalate,
    Resolve { note: Option<String> },
}

impl EventAction {
    pub fn name(&self) -> &'static str {
        match self {
            EventAction::Acknowledge => "acknowledge",
            EventAction::Escalate => "escalate",
            EventAction::Resolve { .. } => "resolve",
        }
    }

    pub fn target(&self) -> EventStatus {
        match self {
            EventAction::Acknowledge => EventStatus::Acknowledged,
            EventAction::Escalate => EventStatus::Escalated,
            EventAction::Resolve { .. } => EventStatus::Resolved,
        }
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opens events and moves them through their lifecycle.
///
/// ```text
/// pending ──acknowledge──▶ acknowledged ──resolve──▶ resolved
///    │                          │
///    └────────escalate──────────┴──────▶ escalated
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EventLifecycle {
    policy: TransitionPolicy,
}

impl EventLifecycle {
    pub fn new(policy: TransitionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    /// Opens a pending event for an out-of-range reading.
    ///
    /// Returns `None` when the reading is not alerting.
    pub fn open_for_vital(&self, vital: &VitalSign) -> Option<AbnormalEvent> {
        if !vital.alert_level.is_alert() {
            return None;
        }
        Some(AbnormalEvent {
            id: uuid::Uuid::new_v4().to_string(),
            date: vital.date,
            time: vital.time.clone(),
            source: EventSource::Vital,
            category: vital.vital_type.as_str().to_string(),
            description: vital.abnormal_description(),
            alert_level: vital.alert_level,
            status: EventStatus::Pending,
            acknowledged_at: None,
            escalated_at: None,
            resolved_at: None,
            resolved_note: None,
            related_vital_id: Some(vital.id.clone()),
        })
    }

    /// Opens a pending orange event for an abnormal observation.
    ///
    /// Returns `None` when the observation is normal.
    pub fn open_for_observation(&self, observation: &ObservationRecord) -> Option<AbnormalEvent> {
        if !observation.is_abnormal {
            return None;
        }
        Some(AbnormalEvent {
            id: uuid::Uuid::new_v4().to_string(),
            date: observation.date,
            time: observation.time.clone(),
            source: EventSource::Observation,
            category: observation.category.as_str().to_string(),
            description: observation.content.clone(),
            alert_level: AlertLevel::Orange,
            status: EventStatus::Pending,
            acknowledged_at: None,
            escalated_at: None,
            resolved_at: None,
            resolved_note: None,
            related_vital_id: None,
        })
    }

    /// Whether `action` may be applied to an event in `from`.
    pub fn allows(&self, from: EventStatus, action: &EventAction) -> bool {
        match self.policy {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::Strict => matches!(
                (from, action),
                (EventStatus::Pending, EventAction::Acknowledge)
                    | (EventStatus::Pending, EventAction::Escalate)
                    | (EventStatus::Acknowledged, EventAction::Resolve { .. })
                    | (EventStatus::Acknowledged, EventAction::Escalate)
            ),
        }
    }

    /// Applies `action` at wall-clock time `at`, returning the updated event.
    ///
    /// The input is left untouched when the transition is rejected.
    pub fn apply(&self, event: &AbnormalEvent, action: &EventAction, at: &str) -> Result<AbnormalEvent> {
        if !self.allows(event.status, action) {
            return Err(CareError::invalid_transition(
                &event.id,
                event.status.as_str(),
                action.name(),
            ));
        }

        let mut updated = event.clone();
        updated.status = action.target();
        match action {
            EventAction::Acknowledge => updated.acknowledged_at = Some(at.to_string()),
            EventAction::Escalate => updated.escalated_at = Some(at.to_string()),
            EventAction::Resolve { note } => {
                updated.resolved_at = Some(at.to_string());
                updated.resolved_note = Some(resolve_note(note.as_deref()));
            }
        }
        Ok(updated)
    }
}

fn resolve_note(note: Option<&str>) -> String {
    match note.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => DEFAULT_RESOLVE_NOTE.to_string(),
    }
}
