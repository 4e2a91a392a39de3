//! Session domain module.
//!
//! This module holds the in-memory care snapshot and the façade that routes
//! caregiver actions through classification, storage and state updates.
//!
//! # Module Structure
//!
//! - `state`: the snapshot (`SessionState`), actions and the pure `reduce`
//! - `aggregator`: the façade (`CareSession`) and its input/outcome types
//!
//! # Usage
//!
//! ```ignore
//! use icare_core::session::{CareSession, TaskSubmission};
//! use icare_core::record::InMemoryRecordStore;
//! use icare_core::clock::SystemClock;
//!
//! let mut session = CareSession::new(Arc::new(InMemoryRecordStore::new()), SystemClock);
//! session.check_in_task("oral_care", None)?;
//! ```

mod aggregator;
mod state;


pub use aggregator::{
    CareSession, IntakeOutputEntry, ObservationEntry, ObservationOutcome, SubmissionOutcome,
    TaskSubmission, VitalOutcome,
};
pub use state::{SessionAction, SessionState, Snapshot, reduce};
