//! Repository traits for care records: get all, get by date, append and
//! upsert.

use super::model::Record;
use crate::error::Result;
use crate::event::AbnormalEvent;
use crate::intake_output::IntakeOutputRecord;
use crate::observation::ObservationRecord;
use crate::patient::PatientProfile;
use crate::report::ShiftReport;
use crate::task::TaskCheckIn;
use crate::vitals::VitalSign;
use chrono::NaiveDate;

/// Persistence for one collection of records.
///
/// # Implementation Notes
///
/// - Reads never fail. A corrupt or missing collection is reported as empty
///   and the backend logs the problem.
/// - Writes are complete read-modify-write cycles. Backends that can be
///   shared between processes must serialize writers themselves.
pub trait RecordRepository<R: Record> {
    /// Returns every record in insertion order.
    fn get_all(&self) -> Vec<R>;

    /// Returns the records stamped with `date`, in insertion order.
    fn get_by_date(&self, date: NaiveDate) -> Vec<R> {
        self.get_all()
            .into_iter()
            .filter(|record| record.date() == date)
            .collect()
    }

    /// Appends a record to the end of the collection.
    fn append(&self, record: &R) -> Result<()>;

    /// Replaces the first record for which `matches` returns true, or appends
    /// `record` when nothing matches.
    fn upsert(&self, record: &R, matches: &dyn Fn(&R) -> bool) -> Result<()>;
}

/// Persistence for the singleton patient profile.
pub trait ProfileRepository {
    /// Loads the stored profile, `None` when nothing usable is stored.
    fn load_profile(&self) -> Option<PatientProfile>;

    /// Replaces the stored profile wholesale.
    fn save_profile(&self, profile: &PatientProfile) -> Result<()>;
}

/// Everything the care session needs from storage.
pub trait CareStore:
    RecordRepository<TaskCheckIn>
    + RecordRepository<VitalSign>
    + RecordRepository<IntakeOutputRecord>
    + RecordRepository<ObservationRecord>
    + RecordRepository<AbnormalEvent>
    + RecordRepository<ShiftReport>
    + ProfileRepository
{
}

impl<T> CareStore for T where
    T: RecordRepository<TaskCheckIn>
        + RecordRepository<VitalSign>
        + RecordRepository<IntakeOutputRecord>
        + RecordRepository<ObservationRecord>
        + RecordRepository<AbnormalEvent>
        + RecordRepository<ShiftReport>
        + ProfileRepository
{
}
