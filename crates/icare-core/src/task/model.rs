//! Care task definitions and check-in records.

use crate::clock::Shift;
use crate::record::{Collection, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grouping of care tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    BasicCare,
    Observation,
    Rehabilitation,
    Prevention,
}

impl TaskCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskCategory::BasicCare => "basic_care",
            TaskCategory::Observation => "observation",
            TaskCategory::Rehabilitation => "rehabilitation",
            TaskCategory::Prevention => "prevention",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskCategory::BasicCare => "基础护理",
            TaskCategory::Observation => "病情观察",
            TaskCategory::Rehabilitation => "康复训练",
            TaskCategory::Prevention => "预防措施",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra data a task asks for when it is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredData {
    Vitals,
    IntakeOutput,
    ObservationText,
}

/// A static care task definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareTask {
    pub id: &'static str,
    pub name: &'static str,
    pub category: TaskCategory,
    pub frequency: &'static str,
    pub description: &'static str,
    pub steps: &'static [&'static str],
    pub check_points: &'static [&'static str],
    pub alert_note: Option<&'static str>,
    pub required_data: Option<RequiredData>,
    pub requires_photo: bool,
}

impl CareTask {
    pub fn requires_data(&self) -> bool {
        self.required_data.is_some()
    }
}

/// Completion of one task on one date. At most one per `(task_id, date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCheckIn {
    pub task_id: String,
    pub date: NaiveDate,
    /// Wall-clock time, `HH:MM`.
    pub time: String,
    pub shift: Shift,
    pub note: Option<String>,
    pub completed: bool,
    pub photo_uri: Option<String>,
}

impl TaskCheckIn {
    /// True when `other` occupies the same `(task_id, date)` slot.
    pub fn same_slot(&self, other: &TaskCheckIn) -> bool {
        self.task_id == other.task_id && self.date == other.date
    }
}

impl Record for TaskCheckIn {
    const COLLECTION: Collection = Collection::CheckIns;

    fn date(&self) -> NaiveDate {
        self.date
    }
}
