//! Shift report module.
//!
//! - `model`: the persisted report snapshot
//! - `synthesizer`: builds a report from a day's activity
//! - `render`: handoff text

mod model;
mod render;
mod synthesizer;

pub use model::{ShiftReport, VitalSummary, report_id};
pub use render::render_text;
pub use synthesizer::{
    FLUID_DEFICIT_THRESHOLD, FLUID_SURPLUS_THRESHOLD, ShiftActivity, ShiftReportSynthesizer,
};
