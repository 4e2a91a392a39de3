//! Care-monitoring domain for a single bedside patient.
//!
//! Records care task check-ins, vital signs, fluid balance and observations,
//! opens abnormal events when readings cross fixed thresholds, and
//! synthesizes shift handoff reports. Storage is abstracted behind the
//! traits in [`record`]; file-backed storage lives in `icare-infrastructure`.

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod intake_output;
pub mod observation;
pub mod patient;
pub mod record;
pub mod report;
pub mod session;
pub mod task;
pub mod vitals;

// Re-export common error type
pub use error::CareError;
