//! Record store module.
//!
//! # Module Structure
//!
//! - `model`: the [`Record`] trait and the [`Collection`] names
//! - `repository`: repository traits and the [`CareStore`] bundle
//! - `memory`: an in-process backend

mod memory;
mod model;
pub mod repository;

pub use memory::InMemoryRecordStore;
pub use model::{Collection, Record};
pub use repository::{CareStore, ProfileRepository, RecordRepository};
