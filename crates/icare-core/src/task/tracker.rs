//! Check-in bookkeeping and completion accounting.

use super::model::TaskCheckIn;
use super::registry::TaskRegistry;
use crate::clock::Shift;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;

/// Completion rate for a single day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyCompletion {
    pub date: NaiveDate,
    pub rate: f64,
}

/// Computes check-ins and completion rates against a task registry.
#[derive(Debug, Clone, Copy)]
pub struct CheckInTracker {
    registry: TaskRegistry,
}

impl CheckInTracker {
    pub fn new(registry: TaskRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Builds a completed check-in for `task_id`.
    pub fn check_in(
        &self,
        task_id: &str,
        date: NaiveDate,
        time: impl Into<String>,
        shift: Shift,
        note: Option<String>,
    ) -> TaskCheckIn {
        TaskCheckIn {
            task_id: task_id.to_string(),
            date,
            time: time.into(),
            shift,
            note: note.filter(|n| !n.trim().is_empty()),
            completed: true,
            photo_uri: None,
        }
    }

    /// Ids of registry tasks with a completed check-in on `date`.
    pub fn completed_ids<'a>(
        &self,
        check_ins: &'a [TaskCheckIn],
        date: NaiveDate,
    ) -> HashSet<&'a str> {
        check_ins
            .iter()
            .filter(|c| c.completed && c.date == date && self.registry.contains(&c.task_id))
            .map(|c| c.task_id.as_str())
            .collect()
    }

    /// Fraction of registry tasks completed on `date`, 0 for an empty registry.
    pub fn completion_rate(&self, check_ins: &[TaskCheckIn], date: NaiveDate) -> f64 {
        if self.registry.is_empty() {
            return 0.0;
        }
        self.completed_ids(check_ins, date).len() as f64 / self.registry.len() as f64
    }

    /// Daily completion for the `days` days ending at `today`, oldest first.
    pub fn trend(&self, check_ins: &[TaskCheckIn], today: NaiveDate, days: u32) -> Vec<DailyCompletion> {
        (0..days)
            .rev()
            .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
            .map(|date| DailyCompletion {
                date,
                rate: self.completion_rate(check_ins, date),
            })
            .collect()
    }
}

impl Default for CheckInTracker {
    fn default() -> Self {
        Self::new(TaskRegistry::standard())
    }
}

/// Replaces the check-in occupying the same `(task_id, date)` slot, or
/// appends when the slot is free.
pub fn upsert_check_in(check_ins: &mut Vec<TaskCheckIn>, check_in: TaskCheckIn) {
    match check_ins.iter_mut().find(|c| c.same_slot(&check_in)) {
        Some(existing) => *existing = check_in,
        None => check_ins.push(check_in),
    }
}
