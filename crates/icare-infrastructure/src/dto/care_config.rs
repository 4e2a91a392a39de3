//! CareConfig DTOs and migrations
//!
//! ### Version History
//! - **1.0.0**: Data directory and logging settings
//! - **1.1.0**: Added `event_transitions`

use icare_core::config::{CareConfig, LogFormat};
use icare_core::event::TransitionPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

/// Configuration V1.0.0.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct CareConfigV1_0_0 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Configuration V1.1.0 (added event_transitions).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
pub struct CareConfigV1_1_0 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default)]
    pub event_transitions: TransitionPolicy,
}

fn default_log_level() -> String {
    CareConfig::default().log_level
}

impl MigratesTo<CareConfigV1_1_0> for CareConfigV1_0_0 {
    fn migrate(self) -> CareConfigV1_1_0 {
        CareConfigV1_1_0 {
            data_dir: self.data_dir,
            log_level: self.log_level,
            log_format: self.log_format,
            event_transitions: TransitionPolicy::default(),
        }
    }
}

impl IntoDomain<CareConfig> for CareConfigV1_1_0 {
    fn into_domain(self) -> CareConfig {
        CareConfig {
            data_dir: self.data_dir,
            log_level: self.log_level,
            log_format: self.log_format,
            event_transitions: self.event_transitions,
        }
    }
}

impl FromDomain<CareConfig> for CareConfigV1_1_0 {
    fn from_domain(config: CareConfig) -> Self {
        CareConfigV1_1_0 {
            data_dir: config.data_dir,
            log_level: config.log_level,
            log_format: config.log_format,
            event_transitions: config.event_transitions,
        }
    }
}

/// Creates and configures a Migrator instance for the configuration file.
///
/// # Migration Path
///
/// - V1.0.0 → V1.1.0: Adds `event_transitions` with the strict policy
/// - V1.1.0 → CareConfig: Converts DTO to domain model
pub fn create_care_config_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let config_path = version_migrate::Migrator::define("care_config")
        .from::<CareConfigV1_0_0>()
        .step::<CareConfigV1_1_0>()
        .into_with_save::<CareConfig>();

    migrator
        .register(config_path)
        .expect("Failed to register care_config migration path");

    migrator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v1_0_0_config_gets_strict_transitions() {
        let migrator = create_care_config_migrator();
        let toml_str = r#"
version = "1.0.0"
log_level = "debug"
log_format = "json"
"#;
        let toml_value: toml::Value = toml::from_str(toml_str).unwrap();

        let config: CareConfig = migrator.load_flat_from("care_config", toml_value).unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.event_transitions, TransitionPolicy::Strict);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_permissive_policy_round_trip() {
        let migrator = create_care_config_migrator();
        let config = CareConfig {
            event_transitions: TransitionPolicy::Permissive,
            ..CareConfig::default()
        };

        let json = migrator.save_domain_flat("care_config", config).unwrap();

        assert!(json.contains("\"version\":\"1.1.0\""));
        assert!(json.contains("\"event_transitions\":\"permissive\""));
        assert!(!json.contains("data_dir"));
    }
}
