//! Care task domain module.
//!
//! - `model`: task definitions and check-in records
//! - `registry`: the static task catalogue
//! - `tracker`: check-in upserts and completion accounting

mod model;
mod registry;
mod tracker;

pub use model::{CareTask, RequiredData, TaskCategory, TaskCheckIn};
pub use registry::TaskRegistry;
pub use tracker::{CheckInTracker, DailyCompletion, upsert_check_in};
