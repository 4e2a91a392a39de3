//! Free-text clinical observations.

use crate::record::{Collection, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationCategory {
    Neuro,
    Abdomen,
    Limb,
    Skin,
    Dehydration,
}

impl ObservationCategory {
    pub const ALL: [ObservationCategory; 5] = [
        ObservationCategory::Neuro,
        ObservationCategory::Abdomen,
        ObservationCategory::Limb,
        ObservationCategory::Skin,
        ObservationCategory::Dehydration,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ObservationCategory::Neuro => "neuro",
            ObservationCategory::Abdomen => "abdomen",
            ObservationCategory::Limb => "limb",
            ObservationCategory::Skin => "skin",
            ObservationCategory::Dehydration => "dehydration",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// Category used when a task's observation text is submitted.
    pub fn for_task(task_id: &str) -> Self {
        match task_id {
            "neuro_observation" => ObservationCategory::Neuro,
            "abdomen_limb_check" => ObservationCategory::Abdomen,
            _ => ObservationCategory::Skin,
        }
    }
}

impl fmt::Display for ObservationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An observation note. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub id: String,
    pub date: NaiveDate,
    pub time: String,
    pub category: ObservationCategory,
    pub content: String,
    pub is_abnormal: bool,
}

impl ObservationRecord {
    pub fn new(
        date: NaiveDate,
        time: impl Into<String>,
        category: ObservationCategory,
        content: impl Into<String>,
        is_abnormal: bool,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            time: time.into(),
            category,
            content: content.into(),
            is_abnormal,
        }
    }

    /// Content prefixed with its normal/abnormal marker.
    pub fn marked(&self) -> String {
        let marker = if self.is_abnormal { "⚠️" } else { "✅" };
        format!("{} {}", marker, self.content)
    }
}

impl Record for ObservationRecord {
    const COLLECTION: Collection = Collection::Observations;

    fn date(&self) -> NaiveDate {
        self.date
    }
}
