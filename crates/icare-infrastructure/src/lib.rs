//! File-backed storage for the iCare domain.
//!
//! Records are kept as versioned TOML documents, one file per collection,
//! and migrated to the current schema when read.

pub mod config_service;
pub mod dto;
pub mod paths;
pub mod storage;
pub mod toml_record_store;

pub use crate::config_service::ConfigService;
pub use crate::paths::{CarePaths, PathError};
pub use crate::toml_record_store::TomlRecordStore;
