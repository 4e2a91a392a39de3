//! Vital sign domain module.
//!
//! - `model`: readings, vital types and alert levels
//! - `classifier`: the pure threshold table

mod classifier;
mod model;

pub use classifier::{classify, classify_named};
pub use model::{AlertLevel, VitalRange, VitalSign, VitalType};
