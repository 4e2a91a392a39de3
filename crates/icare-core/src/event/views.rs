//! Read-only projections over the event history.

use super::model::{AbnormalEvent, EventStatus};
use serde::Serialize;

/// Events split by how far along their lifecycle they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventGroups {
    pub pending: Vec<AbnormalEvent>,
    /// Acknowledged or escalated.
    pub in_progress: Vec<AbnormalEvent>,
    pub resolved: Vec<AbnormalEvent>,
}

impl EventGroups {
    pub fn total(&self) -> usize {
        self.pending.len() + self.in_progress.len() + self.resolved.len()
    }
}

/// Events in reverse insertion order.
pub fn newest_first(events: &[AbnormalEvent]) -> Vec<AbnormalEvent> {
    events.iter().rev().cloned().collect()
}

/// The `limit` most recently opened events, newest first.
pub fn recent(events: &[AbnormalEvent], limit: usize) -> Vec<AbnormalEvent> {
    events.iter().rev().take(limit).cloned().collect()
}

/// Groups events by status, each group newest first.
pub fn group_by_status(events: &[AbnormalEvent]) -> EventGroups {
    events
        .iter()
        .rev()
        .fold(EventGroups::default(), |mut groups, event| {
            match event.status {
                EventStatus::Pending => groups.pending.push(event.clone()),
                EventStatus::Acknowledged | EventStatus::Escalated => {
                    groups.in_progress.push(event.clone())
                }
                EventStatus::Resolved => groups.resolved.push(event.clone()),
            }
            groups
        })
}

/// Events still waiting on the bedside caregiver (pending or acknowledged).
pub fn needing_attention(events: &[AbnormalEvent]) -> Vec<AbnormalEvent> {
    events
        .iter()
        .filter(|event| event.status.needs_attention())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventLifecycle;
    use crate::vitals::{VitalSign, VitalType};
    use chrono::NaiveDate;

    fn events_with(statuses: &[EventStatus]) -> Vec<AbnormalEvent> {
        let date = NaiveDate::from_ymd_opt(2026, 2, 22).unwrap();
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| {
                let vital = VitalSign::new(date, format!("0{}:00", i), VitalType::HeartRate, 120.0);
                let mut event = EventLifecycle::default().open_for_vital(&vital).unwrap();
                event.status = *status;
                event
            })
            .collect()
    }

    #[test]
    fn test_group_by_status() {
        let events = events_with(&[
            EventStatus::Pending,
            EventStatus::Acknowledged,
            EventStatus::Escalated,
            EventStatus::Resolved,
            EventStatus::Pending,
        ]);
        let groups = group_by_status(&events);

        assert_eq!(groups.pending.len(), 2);
        assert_eq!(groups.pending[0].id, events[4].id);
        assert_eq!(groups.in_progress.len(), 2);
        assert_eq!(groups.resolved.len(), 1);
        assert_eq!(groups.total(), events.len());
    }

    #[test]
    fn test_recent_and_newest_first() {
        let events = events_with(&[EventStatus::Pending; 4]);
        let recent = recent(&events, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, events[3].id);
        assert_eq!(recent[1].id, events[2].id);

        assert_eq!(newest_first(&events)[3].id, events[0].id);
    }

    #[test]
    fn test_needing_attention_excludes_escalated() {
        let events = events_with(&[
            EventStatus::Pending,
            EventStatus::Acknowledged,
            EventStatus::Escalated,
            EventStatus::Resolved,
        ]);
        let pending = needing_attention(&events);
        assert_eq!(pending.len(), 2);
        assert!(pending.iter().all(|e| e.status.needs_attention()));
    }
}
