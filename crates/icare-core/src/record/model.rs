//! Record and collection definitions shared by every storage backend.

use chrono::NaiveDate;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;

/// The named collections that make up durable care state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    CheckIns,
    Vitals,
    IntakeOutput,
    Observations,
    AbnormalEvents,
    ShiftReports,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::CheckIns,
        Collection::Vitals,
        Collection::IntakeOutput,
        Collection::Observations,
        Collection::AbnormalEvents,
        Collection::ShiftReports,
    ];

    /// Stable storage key, also used as the file stem by file backends.
    pub fn key(self) -> &'static str {
        match self {
            Collection::CheckIns => "checkins",
            Collection::Vitals => "vitals",
            Collection::IntakeOutput => "intake_output",
            Collection::Observations => "observations",
            Collection::AbnormalEvents => "abnormal_events",
            Collection::ShiftReports => "shift_reports",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A date-stamped record that lives in exactly one collection.
pub trait Record: Clone + Serialize + DeserializeOwned {
    const COLLECTION: Collection;

    /// Calendar date the record belongs to.
    fn date(&self) -> NaiveDate;
}
